//! Coupon Handlers
//!
//! Admin coupon management plus the customer-facing verify endpoint

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Coupon, CouponCreate};
use crate::db::repository::CouponRepository;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppResponse, ok, ok_with_message};

/// Coupon verification request
#[derive(Debug, Deserialize)]
pub struct VerifyCouponRequest {
    pub code: String,
}

/// Coupon verification result (only ever serialized for usable coupons)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCouponResponse {
    pub valid: bool,
    pub discount_percent: i64,
    /// Canonical stored code (uppercase), whatever case the client sent
    pub code: String,
}

/// Create a coupon (admin)
///
/// Codes normalize to uppercase; duplicates are rejected with 409 Conflict.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CouponCreate>,
) -> Result<(StatusCode, Json<AppResponse<Coupon>>), AppError> {
    validate_required_text(&req.code, "code", MAX_SHORT_TEXT_LEN)?;
    if !(1..=100).contains(&req.discount_percent) {
        return Err(AppError::validation(
            "discountPercent must be between 1 and 100",
        ));
    }

    let created_by: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let repo = CouponRepository::new(state.get_db());
    let coupon = repo.create(req, created_by).await?;

    tracing::info!(
        code = %coupon.code,
        discount_percent = coupon.discount_percent,
        "Coupon created"
    );

    Ok((StatusCode::CREATED, ok(coupon)))
}

/// List all coupons, newest first (admin)
pub async fn list_all(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<Vec<Coupon>>>, AppError> {
    let repo = CouponRepository::new(state.get_db());
    let coupons = repo.find_all().await?;

    Ok(ok(coupons))
}

/// Delete a coupon (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AppResponse<()>>, AppError> {
    let repo = CouponRepository::new(state.get_db());
    repo.delete(&id).await?;

    tracing::info!(coupon_id = %id, "Coupon deleted");

    Ok(ok_with_message((), "Coupon deleted successfully"))
}

/// Flip a coupon's active flag (admin)
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AppResponse<Coupon>>, AppError> {
    let repo = CouponRepository::new(state.get_db());
    let coupon = repo.toggle_active(&id).await?;

    tracing::info!(
        code = %coupon.code,
        is_active = coupon.is_active,
        "Coupon toggled"
    );

    Ok(ok(coupon))
}

/// Verify a coupon code for the current cart (any authenticated user)
///
/// Case-insensitive; succeeds only for active, unexpired coupons and
/// returns the canonical stored code.
pub async fn verify(
    State(state): State<ServerState>,
    Json(req): Json<VerifyCouponRequest>,
) -> Result<Json<AppResponse<VerifyCouponResponse>>, AppError> {
    let repo = CouponRepository::new(state.get_db());
    let now = chrono::Utc::now().timestamp_millis();

    let coupon = repo
        .find_usable(&req.code, now)
        .await?
        .ok_or_else(|| AppError::not_found("Invalid or expired coupon code"))?;

    Ok(ok(VerifyCouponResponse {
        valid: true,
        discount_percent: coupon.discount_percent,
        code: coupon.code,
    }))
}
