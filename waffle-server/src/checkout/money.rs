//! Money math for checkout
//!
//! All pricing runs on [`rust_decimal::Decimal`]; `f64` only appears at
//! the storage/API boundary. Conversions round half-away-from-zero to
//! 2 decimal places.
//!
//! Tax model: GST at 18% split into equal CGST and SGST halves of 9%,
//! applied to the coupon-discounted base. Loyalty earn is one point per
//! 10 currency units of the charged total, floored.

use super::CheckoutError;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency precision (2 = cents/paise)
const DECIMAL_PLACES: u32 = 2;

/// CGST and SGST are each this percentage of the taxable base
const GST_COMPONENT_PERCENT: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// One loyalty point per this much charged total
const POINTS_EARN_DIVISOR: Decimal = Decimal::TEN;

/// Upper bound for a unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Upper bound for a line quantity
pub const MAX_QUANTITY: i32 = 9999;

/// Convert a float amount into a Decimal (NaN/Infinity become zero;
/// callers that care validate first)
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert a Decimal back to a float rounded to currency precision
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn require_finite(value: f64, item: &str) -> Result<(), CheckoutError> {
    if !value.is_finite() {
        return Err(CheckoutError::InvalidPrice {
            item: item.to_string(),
        });
    }
    Ok(())
}

/// A cart line carrying the catalog price (never the client's)
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Result of pricing a cart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
    pub points_earned: i64,
}

/// Price a cart: subtotal, coupon discount, GST split, charged total,
/// loyalty earn
///
/// `discount_percent` is the coupon's integer percentage; values outside
/// 0..=100 are clamped. Each money component is rounded to currency
/// precision before the total is composed, so the stored fields always
/// satisfy `total = subtotal - discount + cgst + sgst` exactly.
pub fn price_cart(
    lines: &[PricedLine],
    discount_percent: Option<i64>,
) -> Result<PricingBreakdown, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut subtotal = Decimal::ZERO;
    for line in lines {
        if line.quantity <= 0 || line.quantity > MAX_QUANTITY {
            return Err(CheckoutError::InvalidQuantity {
                item: line.name.clone(),
                quantity: line.quantity,
            });
        }
        require_finite(line.unit_price, &line.name)?;
        if line.unit_price < 0.0 || line.unit_price > MAX_PRICE {
            return Err(CheckoutError::InvalidPrice {
                item: line.name.clone(),
            });
        }
        subtotal += to_decimal(line.unit_price) * Decimal::from(line.quantity);
    }
    let subtotal = round_money(subtotal);

    let percent = discount_percent.unwrap_or(0).clamp(0, 100);
    let discount = round_money(subtotal * Decimal::from(percent) / Decimal::ONE_HUNDRED);

    let taxable = (subtotal - discount).max(Decimal::ZERO);
    let cgst = round_money(taxable * GST_COMPONENT_PERCENT / Decimal::ONE_HUNDRED);
    // SGST mirrors CGST: equal halves of the 18% GST
    let sgst = cgst;

    let total = (taxable + cgst + sgst).max(Decimal::ZERO);
    let points_earned = (total / POINTS_EARN_DIVISOR).floor().to_i64().unwrap_or(0);

    Ok(PricingBreakdown {
        subtotal,
        discount,
        cgst,
        sgst,
        total,
        points_earned,
    })
}
