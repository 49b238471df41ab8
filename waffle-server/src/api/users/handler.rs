//! User Handlers
//!
//! Favorites and the loyalty point balance

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use surrealdb::RecordId;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppResponse, ok};

/// Favorites list after a toggle
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub favorite_items: Vec<String>,
}

/// Loyalty point balance
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPointsResponse {
    pub loyalty_points: i64,
}

/// Toggle a menu item in the current user's favorites
///
/// Returns the full favorites list after the toggle so clients can
/// re-render without a second round trip.
pub async fn toggle_favorite(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(item_id): Path<String>,
) -> Result<Json<AppResponse<FavoritesResponse>>, AppError> {
    let user_id: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let item: RecordId = item_id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid ID: {}", item_id)))?;
    if item.table() != "menu_item" {
        return Err(AppError::validation(format!("Invalid ID: {}", item_id)));
    }

    let repo = UserRepository::new(state.get_db());
    let favorites = repo.toggle_favorite(&user_id, item).await?;

    Ok(ok(FavoritesResponse {
        favorite_items: favorites.iter().map(|f| f.to_string()).collect(),
    }))
}

/// Current loyalty balance
pub async fn loyalty_points(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AppResponse<LoyaltyPointsResponse>>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let fresh = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ok(LoyaltyPointsResponse {
        loyalty_points: fresh.loyalty_points,
    }))
}
