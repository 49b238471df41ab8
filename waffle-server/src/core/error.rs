use thiserror::Error;

/// Errors surfaced while starting or running the server process
///
/// Request-level failures use [`crate::utils::AppError`] and never reach
/// this type; it only covers the boot path.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server lifecycle operations
pub type Result<T> = std::result::Result<T, ServerError>;
