//! Authentication Handlers
//!
//! Handles account registration, login, and the profile view

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserRole};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_password, validate_required_text,
};
use crate::utils::{AppResponse, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Register request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response issued by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Public account summary returned with a token
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Generate a token plus the public account summary for a stored user
fn issue_token(state: &ServerState, user: &User) -> Result<AuthResponse, AppError> {
    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, &user.email, &user.name, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(AuthResponse {
        token,
        user: UserInfo {
            id: user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
        },
    })
}

/// Register handler
///
/// Creates a customer account and returns a fresh JWT.
/// Duplicate emails are rejected with 409 Conflict.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AppResponse<AuthResponse>>), AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.address, "address", MAX_ADDRESS_LEN)?;

    let repo = UserRepository::new(state.get_db());
    let user = repo
        .create(
            UserCreate {
                name: req.name.trim().to_string(),
                email: req.email,
                password: req.password,
                phone: req.phone,
                address: req.address,
            },
            UserRole::Customer,
        )
        .await?;

    let response = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %response.user.id,
        email = %user.email,
        "User registered"
    );

    Ok((StatusCode::CREATED, ok(response)))
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token.
/// Unknown email and wrong password share one unified error message.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AppResponse<AuthResponse>>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent email enumeration
    let user = match user {
        Some(u) => {
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_credentials"
                );
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    if let Some(id) = user.id.as_ref() {
        repo.touch_last_login(id).await?;
    }

    let response = issue_token(&state, &user)?;

    tracing::info!(
        user_id = %response.user.id,
        email = %user.email,
        role = %user.role.as_str(),
        "User logged in successfully"
    );

    Ok(ok(response))
}

/// Get the current user's profile
///
/// Re-reads the account so the loyalty balance and favorites are fresh;
/// the password hash never serializes.
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AppResponse<User>>, AppError> {
    let repo = UserRepository::new(state.get_db());
    let fresh = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ok(fresh))
}
