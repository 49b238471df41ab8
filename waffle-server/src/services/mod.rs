//! Service modules
//!
//! - [`HttpService`] - axum HTTP surface (cached router, graceful shutdown)

pub mod http;

pub use http::HttpService;
