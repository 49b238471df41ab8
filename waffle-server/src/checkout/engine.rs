//! Order placement orchestration
//!
//! The engine owns the full placement sequence:
//!
//! 1. Resolve every cart line against the stored catalog (client prices
//!    are ignored)
//! 2. Re-validate the coupon code at placement time
//! 3. Check the requested loyalty spend against the stored balance
//! 4. Price the cart ([`super::money::price_cart`])
//! 5. Persist with a fresh pickup code, re-rolling on collisions with
//!    the unique index
//! 6. Apply the loyalty balance delta (spend + earn)
//!
//! Step 6 is deliberately not transactional with step 5: if the balance
//! write fails the order stands and the failure is logged. A pickup
//! counter needs the order more than the points ledger needs exactness.

use std::collections::HashMap;

use rand::Rng;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::money::{self, PricedLine};
use super::CheckoutError;
use crate::db::models::{MenuItem, Order, OrderCreate, OrderItem, OrderStatus, PaymentStatus};
use crate::db::repository::{
    CouponRepository, MenuItemRepository, OrderRepository, RepoError, UserRepository,
};

/// Pickup codes span "1000".."9999"; with 9000 values a handful of
/// re-rolls is plenty before conceding the space is saturated
const MAX_PICKUP_CODE_ATTEMPTS: u32 = 8;

/// Minutes quoted to the customer at placement
const DEFAULT_ESTIMATED_TIME: i32 = 20;

#[derive(Clone)]
pub struct CheckoutEngine {
    orders: OrderRepository,
    menu: MenuItemRepository,
    coupons: CouponRepository,
    users: UserRepository,
}

impl CheckoutEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            coupons: CouponRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Place an order for `user_id` from the client's cart payload
    pub async fn place_order(
        &self,
        user_id: &RecordId,
        request: OrderCreate,
    ) -> Result<Order, CheckoutError> {
        if request.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // 1. Reprice from the catalog
        let ids: Vec<RecordId> = request.items.iter().map(|l| l.menu_item.clone()).collect();
        let catalog = self.menu.find_many(ids).await?;
        let by_id: HashMap<String, &MenuItem> = catalog
            .iter()
            .filter_map(|m| m.id.as_ref().map(|id| (id.to_string(), m)))
            .collect();

        let mut priced_lines = Vec::with_capacity(request.items.len());
        let mut order_items = Vec::with_capacity(request.items.len());
        for cart_line in &request.items {
            let key = cart_line.menu_item.to_string();
            let item = by_id
                .get(&key)
                .ok_or_else(|| CheckoutError::UnknownItem(key.clone()))?;
            if !item.is_available {
                return Err(CheckoutError::ItemUnavailable(item.name.clone()));
            }
            priced_lines.push(PricedLine {
                name: item.name.clone(),
                unit_price: item.price,
                quantity: cart_line.quantity,
            });
            order_items.push(OrderItem {
                menu_item: cart_line.menu_item.clone(),
                name: item.name.clone(),
                quantity: cart_line.quantity,
                price: item.price,
            });
        }

        // 2. Coupon state is re-checked now, not trusted from the client
        let now = chrono::Utc::now().timestamp_millis();
        let coupon = match request
            .coupon_applied
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
        {
            Some(code) => Some(
                self.coupons
                    .find_usable(code, now)
                    .await?
                    .ok_or(CheckoutError::CouponNotUsable)?,
            ),
            None => None,
        };

        // 3. Loyalty spend against the stored balance
        let points_to_spend = request.loyalty_points_used.unwrap_or(0);
        if points_to_spend < 0 {
            return Err(CheckoutError::InvalidPointsSpend);
        }
        let user = self
            .users
            .find_by_id(&user_id.to_string())
            .await?
            .ok_or_else(|| {
                CheckoutError::Repo(RepoError::NotFound(format!("User {} not found", user_id)))
            })?;
        if points_to_spend > user.loyalty_points {
            return Err(CheckoutError::InsufficientPoints);
        }

        // 4. Price
        let pricing = money::price_cart(
            &priced_lines,
            coupon.as_ref().map(|c| c.discount_percent),
        )?;

        // 5. Persist, re-rolling the pickup code on unique-index collisions
        let mut attempts = 0;
        let order = loop {
            let candidate = Order {
                id: None,
                user: user_id.clone(),
                items: order_items.clone(),
                subtotal: money::to_f64(pricing.subtotal),
                discount_amount: money::to_f64(pricing.discount),
                cgst: money::to_f64(pricing.cgst),
                sgst: money::to_f64(pricing.sgst),
                total_amount: money::to_f64(pricing.total),
                pickup_code: roll_pickup_code(),
                status: OrderStatus::Pending,
                payment_status: PaymentStatus::Pending,
                estimated_time: DEFAULT_ESTIMATED_TIME,
                special_instructions: request.special_instructions.clone(),
                loyalty_points_used: points_to_spend,
                loyalty_points_earned: pricing.points_earned,
                coupon_applied: coupon.as_ref().map(|c| c.code.clone()),
                created_at: now,
                updated_at: now,
            };

            match self.orders.create(candidate).await {
                Ok(order) => break order,
                Err(RepoError::Duplicate(_)) => {
                    attempts += 1;
                    if attempts >= MAX_PICKUP_CODE_ATTEMPTS {
                        return Err(CheckoutError::PickupCodeExhausted);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        };

        // 6. Loyalty balance delta; the order stands even if this fails
        let delta = pricing.points_earned - points_to_spend;
        if delta != 0 {
            if let Err(e) = self.users.adjust_loyalty_points(user_id, delta).await {
                tracing::error!(
                    target: "checkout",
                    order = %order.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                    user = %user_id,
                    delta,
                    error = %e,
                    "Order persisted but loyalty balance update failed"
                );
            }
        }

        tracing::info!(
            target: "checkout",
            user = %user_id,
            total = order.total_amount,
            pickup_code = %order.pickup_code,
            "Order placed"
        );

        Ok(order)
    }
}

/// Roll a pickup code in "1000".."9999"
fn roll_pickup_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(1000..=9999);
    code.to_string()
}
