//! Admin Account Module

mod handler;

use axum::{Router, middleware, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Admin account router (profile self-service)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/profile", put(handler::update_profile))
        .layer(middleware::from_fn(require_admin))
}
