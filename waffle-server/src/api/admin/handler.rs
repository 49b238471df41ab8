//! Admin Account Handlers
//!
//! Self-service profile updates for the back-office account

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_optional_text, validate_password,
};
use crate::utils::{AppResponse, ok_with_message};

/// Profile update payload; every field optional
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Updated account summary
#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Update the admin's own account (admin)
///
/// Changing the password requires the current one; a changed email must
/// not collide with another account.
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<AppResponse<ProfileInfo>>, AppError> {
    validate_optional_text(&req.name, "name", MAX_NAME_LEN)?;

    let user_id: RecordId = user
        .id
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed token subject"))?;

    let repo = UserRepository::new(state.get_db());
    let stored = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // Any password on the request is checked against the stored hash
    if let Some(current) = req.current_password.as_deref() {
        let valid = stored
            .verify_password(current)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            security_log!(
                "WARN",
                "profile_update_denied",
                user_id = user.id.clone(),
                reason = "wrong_current_password"
            );
            return Err(AppError::validation("Current password is incorrect"));
        }
    }

    // A new password is accepted only alongside the current one
    let new_hash = match req.new_password.as_deref() {
        Some(new_password) => {
            if req.current_password.is_none() {
                return Err(AppError::validation(
                    "Current password is required to change the password",
                ));
            }
            validate_password(new_password)?;
            let hash = User::hash_password(new_password)
                .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
            Some(hash)
        }
        None => None,
    };

    // Email changes must not collide with another account
    let new_email = match req.email.as_deref().map(str::trim) {
        Some(email) if !email.eq_ignore_ascii_case(&stored.email) => {
            validate_email(email)?;
            let email = email.to_lowercase();
            if repo.find_by_email(&email).await?.is_some() {
                return Err(AppError::conflict("Email already in use"));
            }
            Some(email)
        }
        _ => None,
    };

    let new_name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let updated = repo
        .update_account(&user_id, new_name, new_email, new_hash)
        .await?;

    tracing::info!(user_id = %user.id, email = %updated.email, "Admin profile updated");

    Ok(ok_with_message(
        ProfileInfo {
            id: user.id,
            name: updated.name,
            email: updated.email,
            role: updated.role.as_str().to_string(),
        },
        "Profile updated successfully",
    ))
}
