//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod user;

// Catalog
pub mod menu_item;

// Promotions
pub mod coupon;

// Orders
pub mod order;

// Re-exports
pub use user::{User, UserCreate, UserId, UserRole};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, NutritionInfo};
pub use coupon::{Coupon, CouponCreate, CouponId};
pub use order::{
    CartLine, Order, OrderCreate, OrderId, OrderItem, OrderStatus, OrderStatusUpdate,
    PaymentStatus, PickupCodeQuery,
};
