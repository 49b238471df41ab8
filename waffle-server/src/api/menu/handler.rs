//! Menu Handlers
//!
//! Catalog browsing for the storefront and CRUD for the admin console

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppError;
use crate::checkout::money::MAX_PRICE;
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppResponse, ok, ok_with_message};

/// Price must be positive, finite, and below the pricing engine's cap
fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::validation("price must be greater than zero"));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "price must not exceed {}",
            MAX_PRICE
        )));
    }
    Ok(())
}

/// Display percent (struck-through price rendering), 0-100
fn validate_discount(discount: f64) -> Result<(), AppError> {
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(AppError::validation("discount must be between 0 and 100"));
    }
    Ok(())
}

/// List the whole catalog (unavailable items included, clients grey them out)
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<MenuItem>>>, AppError> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find_all().await?;
    Ok(ok(items))
}

/// Fetch a single menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AppResponse<MenuItem>>, AppError> {
    let repo = MenuItemRepository::new(state.get_db());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Menu item not found"))?;
    Ok(ok(item))
}

/// Create a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<MenuItemCreate>,
) -> Result<(StatusCode, Json<AppResponse<MenuItem>>), AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.image, "image", MAX_URL_LEN)?;
    validate_price(req.price)?;
    if let Some(discount) = req.discount {
        validate_discount(discount)?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(req).await?;

    tracing::info!(
        item_id = %item.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        name = %item.name,
        "Menu item created"
    );

    Ok((StatusCode::CREATED, ok(item)))
}

/// Update a menu item (admin, partial)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<MenuItemUpdate>,
) -> Result<Json<AppResponse<MenuItem>>, AppError> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&req.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&req.image, "image", MAX_URL_LEN)?;
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(discount) = req.discount {
        validate_discount(discount)?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, req).await?;

    tracing::info!(item_id = %id, "Menu item updated");

    Ok(ok(item))
}

/// Delete a menu item (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AppResponse<()>>, AppError> {
    let repo = MenuItemRepository::new(state.get_db());
    repo.delete(&id).await?;

    tracing::info!(item_id = %id, "Menu item deleted");

    Ok(ok_with_message((), "Menu item deleted"))
}
