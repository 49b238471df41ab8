//! Route guards
//!
//! Which routes are public, what the auth middleware rejects, and how
//! the admin gate answers customers.

use axum::body::to_bytes;
use http::{Method, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use waffle_server::{Config, ServerState};

async fn setup() -> (ServerState, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(tmp.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).await;
    (state, tmp)
}

async fn request(
    state: &ServerState,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = http::Request::builder().uri(path).method(method);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    let bytes = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            serde_json::to_vec(v).unwrap()
        }
        None => Vec::new(),
    };

    let response = state
        .http
        .oneshot(builder.body(bytes.into()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

async fn register(state: &ServerState, name: &str, email: &str, password: &str) -> String {
    let (status, body) = request(
        state,
        Method::POST,
        "/api/auth/register",
        None,
        Some(&json!({"name": name, "email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public_and_unwrapped() {
    let (state, _tmp) = setup().await;

    let (status, body) = request(&state, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    // No response envelope on the probe
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_u64());
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn test_menu_browsing_needs_no_token() {
    let (state, _tmp) = setup().await;

    let (status, body) = request(&state, Method::GET, "/api/menu", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_protected_routes_reject_missing_and_bad_tokens() {
    let (state, _tmp) = setup().await;

    let (status, body) =
        request(&state, Method::GET, "/api/orders/my-orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");
    assert_eq!(body["message"], "Please login first");

    let (status, body) = request(
        &state,
        Method::GET,
        "/api/orders/my-orders",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn test_admin_routes_reject_customers() {
    let (state, _tmp) = setup().await;
    let customer = register(&state, "Gil", "gil@example.com", "crispy1").await;

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/menu",
        Some(&customer),
        Some(&json!({"name": "Sneaky Waffle", "price": 1.0, "category": "classic"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");
}

#[tokio::test]
async fn test_menu_lookup_rejects_foreign_and_missing_ids() {
    let (state, _tmp) = setup().await;

    let (status, body) =
        request(&state, Method::GET, "/api/menu/menu_item:nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Menu item not found");

    let (status, body) = request(&state, Method::GET, "/api/menu/user:abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID: user:abc");
}
