//! Favorites and loyalty points
//!
//! Per-account features layered on top of ordering: toggling favorite
//! menu items and earning/spending loyalty points across orders.

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

async fn login(state: &ServerState, email: &str, password: &str) -> String {
    let (status, body) = request(
        state,
        Method::POST,
        "/api/auth/login",
        None,
        Some(&json!({"email": email, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
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

async fn create_item(state: &ServerState, admin: &str, name: &str, price: f64) -> String {
    let (status, body) = request(
        state,
        Method::POST,
        "/api/menu",
        Some(admin),
        Some(&json!({"name": name, "price": price, "category": "classic"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create item failed: {}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_favorites_toggle() {
    let (state, _tmp) = setup().await;
    let admin = login(&state, "admin@waffles.com", "admin123").await;
    let customer = register(&state, "Faye", "faye@example.com", "maple99").await;

    let item_id = create_item(&state, &admin, "Nutella Dream", 150.0).await;

    // First toggle adds
    let (status, body) = request(
        &state,
        Method::POST,
        &format!("/api/users/favorites/{}", item_id),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "toggle failed: {}", body);
    let favorites = body["data"]["favoriteItems"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0], Value::String(item_id.clone()));

    // Second toggle removes
    let (status, body) = request(
        &state,
        Method::POST,
        &format!("/api/users/favorites/{}", item_id),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["favoriteItems"].as_array().unwrap().is_empty());

    // Only menu item ids are accepted
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/users/favorites/user:abc",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID: user:abc");
}

#[tokio::test]
async fn test_loyalty_points_earn_and_redeem() {
    let (state, _tmp) = setup().await;
    let admin = login(&state, "admin@waffles.com", "admin123").await;
    let customer = register(&state, "Noel", "noel@example.com", "syrup55").await;

    let item_id = create_item(&state, &admin, "Classic Belgian Waffle", 100.0).await;

    // Fresh accounts start at zero
    let (status, body) = request(
        &state,
        Method::GET,
        "/api/users/loyalty-points",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["loyaltyPoints"], 0);

    // 2 x 100 earns floor(236 / 10) = 23
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({"items": [{"menuItem": item_id, "quantity": 2}]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order failed: {}", body);
    assert_eq!(body["data"]["totalAmount"], 236.0);
    assert_eq!(body["data"]["loyaltyPointsEarned"], 23);

    let (_, body) = request(
        &state,
        Method::GET,
        "/api/users/loyalty-points",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(body["data"]["loyaltyPoints"], 23);

    // Redeeming 10 points: balance drops by the spend, then the new
    // order's earn lands on top (23 - 10 + 11 = 24)
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({
            "items": [{"menuItem": item_id, "quantity": 1}],
            "loyaltyPointsUsed": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "redeem order failed: {}", body);
    let order = &body["data"];
    assert_eq!(order["subtotal"], 100.0);
    assert_eq!(order["cgst"], 9.0);
    assert_eq!(order["sgst"], 9.0);
    assert_eq!(order["totalAmount"], 118.0);
    assert_eq!(order["loyaltyPointsUsed"], 10);
    assert_eq!(order["loyaltyPointsEarned"], 11);

    let (_, body) = request(
        &state,
        Method::GET,
        "/api/users/loyalty-points",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(body["data"]["loyaltyPoints"], 24);
}
