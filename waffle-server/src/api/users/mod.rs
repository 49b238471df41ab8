//! User API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// User router (favorites and loyalty points)
///
/// All routes require authentication (global require_auth middleware)
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/favorites/{item_id}", post(handler::toggle_favorite))
        .route("/loyalty-points", get(handler::loyalty_points))
}
