//! Order Handlers
//!
//! Checkout entry point plus customer history and the admin console

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use surrealdb::RecordId;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatusUpdate, PickupCodeQuery};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppResponse, ok};

/// Place an order (checkout)
///
/// Totals are recomputed server-side from the stored catalog; the coupon
/// is re-validated; the pickup code is re-rolled on collision.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<OrderCreate>,
) -> Result<(StatusCode, Json<AppResponse<Order>>), AppError> {
    validate_optional_text(&req.special_instructions, "specialInstructions", MAX_NOTE_LEN)?;

    let user_id: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let order = state.checkout_engine().place_order(&user_id, req).await?;

    Ok((StatusCode::CREATED, ok(order)))
}

/// The current user's order history, newest first
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AppResponse<Vec<Order>>>, AppError> {
    let user_id: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_by_user(&user_id).await?;

    Ok(ok(orders))
}

/// Every order, newest first (admin console)
pub async fn list_all(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Order>>>, AppError> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all().await?;

    Ok(ok(orders))
}

/// Look an order up by its pickup code (admin, at the counter)
pub async fn verify_code(
    State(state): State<ServerState>,
    Json(req): Json<PickupCodeQuery>,
) -> Result<Json<AppResponse<Order>>, AppError> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_pickup_code(&req.pickup_code)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid pickup code"))?;

    Ok(ok(order))
}

/// Overwrite an order's lifecycle status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<OrderStatusUpdate>,
) -> Result<Json<AppResponse<Order>>, AppError> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.update_status(&id, req.status).await?;

    tracing::info!(
        order_id = %id,
        status = %order.status.as_str(),
        "Order status updated"
    );

    Ok(ok(order))
}
