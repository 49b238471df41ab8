//! End-to-end storefront flow through the in-process router
//!
//! Drives the real HTTP surface (auth middleware included) against an
//! embedded database in a temporary directory. No network sockets.

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

#[tokio::test]
async fn test_register_login_and_profile() {
    let (state, _tmp) = setup().await;

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/auth/register",
        None,
        Some(&json!({
            "name": "Maya",
            "email": "maya@example.com",
            "password": "crispy1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["user"]["email"], "maya@example.com");
    assert_eq!(body["data"]["user"]["role"], "customer");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());

    // Same email again conflicts
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/auth/register",
        None,
        Some(&json!({
            "name": "Maya Two",
            "email": "maya@example.com",
            "password": "crispy2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists");

    let token = login(&state, "maya@example.com", "crispy1").await;

    // Wrong password and unknown email share the unified message
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/auth/login",
        None,
        Some(&json!({"email": "maya@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/auth/login",
        None,
        Some(&json!({"email": "nobody@example.com", "password": "whatever"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) =
        request(&state, Method::GET, "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Maya");
    assert_eq!(body["data"]["loyaltyPoints"], 0);
    assert!(body["data"].get("hashPass").is_none());
}

#[tokio::test]
async fn test_order_flow_with_admin_board() {
    let (state, _tmp) = setup().await;
    let admin = login(&state, "admin@waffles.com", "admin123").await;

    // Admin stocks the catalog
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/menu",
        Some(&admin),
        Some(&json!({
            "name": "Classic Belgian Waffle",
            "price": 100.0,
            "category": "classic"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(item_id.starts_with("menu_item:"));
    assert_eq!(body["data"]["isAvailable"], true);
    assert_eq!(body["data"]["rating"], 4.5);

    let customer = register(&state, "Ben", "ben@example.com", "maple42").await;

    // Customer places an order; the server reprices everything
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({
            "items": [{"menuItem": item_id, "quantity": 2, "price": 1.0}],
            "totalAmount": 1.0,
            "specialInstructions": "extra syrup"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order failed: {}", body);
    let order = &body["data"];
    assert_eq!(order["subtotal"], 200.0);
    assert_eq!(order["discountAmount"], 0.0);
    assert_eq!(order["cgst"], 18.0);
    assert_eq!(order["sgst"], 18.0);
    assert_eq!(order["totalAmount"], 236.0);
    assert_eq!(order["loyaltyPointsEarned"], 23);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paymentStatus"], "pending");
    assert_eq!(order["specialInstructions"], "extra syrup");
    assert_eq!(order["items"][0]["name"], "Classic Belgian Waffle");
    assert_eq!(order["items"][0]["price"], 100.0);

    let order_id = order["id"].as_str().unwrap().to_string();
    let pickup_code = order["pickupCode"].as_str().unwrap().to_string();
    assert_eq!(pickup_code.len(), 4);
    assert!(pickup_code.chars().all(|c| c.is_ascii_digit()));

    // Earned points land on the account
    let (status, body) =
        request(&state, Method::GET, "/api/auth/profile", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["loyaltyPoints"], 23);

    // Customer history
    let (status, body) = request(
        &state,
        Method::GET,
        "/api/orders/my-orders",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Admin board sees it too; the customer does not
    let (status, body) =
        request(&state, Method::GET, "/api/orders/admin", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = request(
        &state,
        Method::GET,
        "/api/orders/admin",
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admin access required");

    // Pickup code lookup at the counter
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders/verify-code",
        Some(&admin),
        Some(&json!({"pickupCode": pickup_code})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalAmount"], 236.0);

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders/verify-code",
        Some(&admin),
        Some(&json!({"pickupCode": "0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Invalid pickup code");

    // Status board updates
    let (status, body) = request(
        &state,
        Method::PUT,
        &format!("/api/orders/{}/status", order_id),
        Some(&admin),
        Some(&json!({"status": "preparing"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "status update failed: {}", body);
    assert_eq!(body["data"]["status"], "preparing");

    let (status, body) = request(
        &state,
        Method::PUT,
        "/api/orders/order:doesnotexist/status",
        Some(&admin),
        Some(&json!({"status": "ready"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn test_order_rejects_bad_carts() {
    let (state, _tmp) = setup().await;
    let admin = login(&state, "admin@waffles.com", "admin123").await;
    let customer = register(&state, "Ada", "ada@example.com", "sugar99").await;

    // Empty cart
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({"items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cart is empty");

    // Unknown catalog item
    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({"items": [{"menuItem": "menu_item:ghost", "quantity": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "body: {}", body);

    // Sold-out item
    let (_, body) = request(
        &state,
        Method::POST,
        "/api/menu",
        Some(&admin),
        Some(&json!({
            "name": "Seasonal Pumpkin",
            "price": 90.0,
            "category": "seasonal",
            "isAvailable": false
        })),
    )
    .await;
    let item_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({"items": [{"menuItem": item_id, "quantity": 1}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Item is not available: Seasonal Pumpkin");

    // Spending points you do not have
    let (_, body) = request(
        &state,
        Method::POST,
        "/api/menu",
        Some(&admin),
        Some(&json!({"name": "Plain Waffle", "price": 50.0, "category": "classic"})),
    )
    .await;
    let plain_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &state,
        Method::POST,
        "/api/orders",
        Some(&customer),
        Some(&json!({
            "items": [{"menuItem": plain_id, "quantity": 1}],
            "loyaltyPointsUsed": 500
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Insufficient loyalty points");
}
