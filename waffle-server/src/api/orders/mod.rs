//! Order API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // Customer routes: any authenticated user
    let customer_routes = Router::new()
        .route("/", post(handler::create))
        .route("/my-orders", get(handler::my_orders));

    // Admin console routes: listing, counter lookup, status transitions
    let admin_routes = Router::new()
        .route("/admin", get(handler::list_all))
        .route("/verify-code", post(handler::verify_code))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    customer_routes.merge(admin_routes)
}
