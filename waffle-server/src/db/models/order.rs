//! Order Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

// =============================================================================
// Status enums
// =============================================================================

/// Order lifecycle status
///
/// Staff may set any status in any direction; there is no enforced
/// transition graph. Repeating the current status is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Payment settlement status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

// =============================================================================
// Order
// =============================================================================

/// A single priced line on an order
///
/// `name` and `price` are snapshots taken at checkout so listings
/// render without re-reading the catalog (and survive later edits).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
}

/// Order entity
///
/// Money fields are rounded to 2 decimal places; all timestamps are
/// Unix millis. `pickupCode` is unique across all orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount_amount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub total_amount: f64,
    pub pickup_code: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(default = "default_estimated_time")]
    pub estimated_time: i32,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub loyalty_points_used: i64,
    #[serde(default)]
    pub loyalty_points_earned: i64,
    #[serde(default)]
    pub coupon_applied: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_estimated_time() -> i32 {
    20
}

// =============================================================================
// Request payloads
// =============================================================================

/// A cart line as sent by the client
///
/// The client includes the price it displayed; checkout ignores it and
/// reprices from the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: i32,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Place order payload
///
/// `totalAmount` and `discountAmount` are accepted for compatibility
/// with existing clients and ignored; the server recomputes both.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub loyalty_points_used: Option<i64>,
    #[serde(default)]
    pub coupon_applied: Option<String>,
    #[serde(default)]
    pub discount_amount: Option<f64>,
}

/// Status update payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Pickup code lookup payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupCodeQuery {
    pub pickup_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_form_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        let status: OrderStatus = serde_json::from_str("\"ready\"").unwrap();
        assert_eq!(status, OrderStatus::Ready);
        assert!(serde_json::from_str::<OrderStatus>("\"READY\"").is_err());
    }

    #[test]
    fn test_order_create_accepts_legacy_payload() {
        // Shape produced by the existing web client
        let payload = r#"{
            "items": [{"menuItem": "menu_item:belgian", "quantity": 2, "price": 120.0}],
            "totalAmount": 283.2,
            "specialInstructions": "no sugar dust",
            "couponApplied": "SAVE10",
            "discountAmount": 24.0
        }"#;
        let req: OrderCreate = serde_json::from_str(payload).unwrap();
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2);
        assert_eq!(req.coupon_applied.as_deref(), Some("SAVE10"));
        assert_eq!(req.loyalty_points_used, None);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            id: None,
            user: "user:u1".parse().unwrap(),
            items: vec![OrderItem {
                menu_item: "menu_item:belgian".parse().unwrap(),
                name: "Belgian Waffle".to_string(),
                quantity: 2,
                price: 100.0,
            }],
            subtotal: 200.0,
            discount_amount: 0.0,
            cgst: 18.0,
            sgst: 18.0,
            total_amount: 236.0,
            pickup_code: "4821".to_string(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            estimated_time: 20,
            special_instructions: None,
            loyalty_points_used: 0,
            loyalty_points_earned: 23,
            coupon_applied: None,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["pickupCode"], "4821");
        assert_eq!(json["totalAmount"], 236.0);
        assert_eq!(json["loyaltyPointsEarned"], 23);
        assert_eq!(json["status"], "pending");
        assert_eq!(json["paymentStatus"], "pending");
        assert_eq!(json["items"][0]["menuItem"], "menu_item:belgian");
    }
}
