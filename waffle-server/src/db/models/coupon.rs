//! Coupon Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Coupon ID type
pub type CouponId = RecordId;

/// Coupon model
///
/// Codes are stored uppercase; lookups uppercase their input so
/// "save10" and "SAVE10" hit the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<CouponId>,
    pub code: String,
    pub discount_percent: i64,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    /// Expiry as Unix millis
    pub expires_at: i64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub created_by: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create coupon payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreate {
    pub code: String,
    pub discount_percent: i64,
    pub expires_at: i64,
}

impl Coupon {
    /// Whether the coupon can be applied right now
    pub fn is_usable(&self, now_millis: i64) -> bool {
        self.is_active && self.expires_at > now_millis
    }
}
