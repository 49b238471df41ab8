//! Checkout Engine
//!
//! Server-side order placement: carts are repriced from the stored
//! catalog, coupons re-validated at placement time, loyalty spends
//! checked against the stored balance, and every order gets a unique
//! 4-digit pickup code.
//!
//! # Layout
//!
//! - [`money`] - decimal pricing math (subtotal, coupon discount, GST split, totals)
//! - [`engine`] - orchestration over the repositories

pub mod engine;
pub mod money;

pub use engine::CheckoutEngine;
pub use money::{PricedLine, PricingBreakdown};

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

/// Checkout failure modes
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Menu item not found: {0}")]
    UnknownItem(String),

    #[error("Item is not available: {0}")]
    ItemUnavailable(String),

    #[error("Invalid quantity for {item}: {quantity}")]
    InvalidQuantity { item: String, quantity: i32 },

    #[error("Invalid price for {item}")]
    InvalidPrice { item: String },

    #[error("Invalid or expired coupon code")]
    CouponNotUsable,

    #[error("Invalid loyalty points amount")]
    InvalidPointsSpend,

    #[error("Insufficient loyalty points")]
    InsufficientPoints,

    #[error("Could not allocate a pickup code")]
    PickupCodeExhausted,

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart
            | CheckoutError::ItemUnavailable(_)
            | CheckoutError::InvalidQuantity { .. }
            | CheckoutError::InvalidPrice { .. }
            | CheckoutError::InvalidPointsSpend
            | CheckoutError::InsufficientPoints => AppError::validation(err.to_string()),

            CheckoutError::UnknownItem(_) | CheckoutError::CouponNotUsable => {
                AppError::not_found(err.to_string())
            }

            CheckoutError::PickupCodeExhausted => AppError::conflict(err.to_string()),

            CheckoutError::Repo(e) => e.into(),
        }
    }
}
