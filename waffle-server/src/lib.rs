//! Waffle Server - ordering backend for a waffle shop
//!
//! # Overview
//!
//! Single-binary HTTP service covering the full storefront flow:
//!
//! - **Accounts** (`api/auth`, `api/users`): register/login with Argon2 +
//!   JWT, favorites, loyalty points
//! - **Catalog** (`api/menu`): public menu reads, admin-managed writes
//! - **Checkout** (`checkout`): cart pricing, coupon redemption, GST,
//!   pickup-code assignment
//! - **Orders** (`api/orders`): history, admin status board, pickup-code
//!   verification
//! - **Storage** (`db`): embedded SurrealDB over RocksDB
//!
//! # Module structure
//!
//! ```text
//! waffle-server/src/
//! ├── core/          # Config, state, server, errors
//! ├── auth/          # JWT issuance/validation, guards
//! ├── api/           # HTTP routes and handlers
//! ├── checkout/      # Pricing and order placement
//! ├── services/      # HTTP service wiring
//! ├── db/            # Models and repositories
//! └── utils/         # Envelope, errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod checkout;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use checkout::CheckoutEngine;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

// Security logging macro - structured events on a dedicated target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
 _       __           ____   ____   __
| |     / /  ____ _  / __/  / __/  / /  ___
| | /| / /  / __ `/ / /_   / /_   / /  / _ \
| |/ |/ /  / /_/ / / __/  / __/  / /  /  __/
|__/|__/   \__,_/ /_/    /_/    /_/   \___/
    "#
    );
}

/// Prepare the process environment before anything else runs
///
/// Loads `.env`, creates the log directory, and installs the logger.
/// File logging turns on with `LOG_TO_FILE=true`; old log files past
/// `LOG_RETENTION_DAYS` (default 30) are swept on startup.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_json = std::env::var("LOG_JSON").ok().and_then(|v| v.parse().ok());
    let log_to_file = std::env::var("LOG_TO_FILE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    if log_to_file {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let log_dir = std::path::Path::new(&work_dir).join("logs");
        std::fs::create_dir_all(&log_dir)?;

        let retention_days = std::env::var("LOG_RETENTION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let log_dir = log_dir.to_string_lossy();
        cleanup_old_logs(&log_dir, retention_days)?;

        init_logger_with_file(log_level.as_deref(), log_json, Some(&log_dir));
    } else {
        init_logger_with_file(log_level.as_deref(), log_json, None);
    }

    Ok(())
}
