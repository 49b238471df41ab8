//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - register / login / profile
//! - [`menu`] - catalog browsing and admin management
//! - [`orders`] - checkout, order history, pickup-code lookup, status updates
//! - [`coupons`] - coupon management and verification
//! - [`users`] - favorites and loyalty points
//! - [`admin`] - back-office account self-service

pub mod auth;
pub mod health;

// Storefront API
pub mod coupons;
pub mod menu;
pub mod orders;
pub mod users;

// Back office
pub mod admin;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
