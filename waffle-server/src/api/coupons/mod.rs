//! Coupon API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Coupon router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    // Customer route: coupon pre-check during cart review
    let customer_routes = Router::new().route("/verify", post(handler::verify));

    // Admin routes: coupon management
    let admin_routes = Router::new()
        .route("/", post(handler::create))
        .route("/admin", get(handler::list_all))
        .route("/{id}", axum::routing::delete(handler::delete))
        .route("/{id}/toggle", axum::routing::patch(handler::toggle))
        .layer(middleware::from_fn(require_admin));

    customer_routes.merge(admin_routes)
}
