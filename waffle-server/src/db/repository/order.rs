//! Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a priced order
    ///
    /// A pickup-code collision trips the unique index and comes back as
    /// [`RepoError::Duplicate`]; the caller re-rolls and retries.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    user = $user,
                    items = $items,
                    subtotal = $subtotal,
                    discountAmount = $discount_amount,
                    cgst = $cgst,
                    sgst = $sgst,
                    totalAmount = $total_amount,
                    pickupCode = $pickup_code,
                    status = $status,
                    paymentStatus = $payment_status,
                    estimatedTime = $estimated_time,
                    specialInstructions = $special_instructions,
                    loyaltyPointsUsed = $loyalty_points_used,
                    loyaltyPointsEarned = $loyalty_points_earned,
                    couponApplied = $coupon_applied,
                    createdAt = $created_at,
                    updatedAt = $updated_at
                RETURN AFTER"#,
            )
            .bind(("user", order.user))
            .bind(("items", order.items))
            .bind(("subtotal", order.subtotal))
            .bind(("discount_amount", order.discount_amount))
            .bind(("cgst", order.cgst))
            .bind(("sgst", order.sgst))
            .bind(("total_amount", order.total_amount))
            .bind(("pickup_code", order.pickup_code))
            .bind(("status", order.status))
            .bind(("payment_status", order.payment_status))
            .bind(("estimated_time", order.estimated_time))
            .bind(("special_instructions", order.special_instructions))
            .bind(("loyalty_points_used", order.loyalty_points_used))
            .bind(("loyalty_points_earned", order.loyalty_points_earned))
            .bind(("coupon_applied", order.coupon_applied))
            .bind(("created_at", order.created_at))
            .bind(("updated_at", order.updated_at))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = super::parse_scoped_id("order", id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Find a user's orders, newest first
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY createdAt DESC")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find all orders, newest first (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by its pickup code
    pub async fn find_by_pickup_code(&self, code: &str) -> RepoResult<Option<Order>> {
        let code_owned = code.trim().to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE pickupCode = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Set the lifecycle status (idempotent, no transition graph)
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let thing = super::parse_scoped_id("order", id)?;
        let now = chrono::Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound("Order not found".to_string()))
    }
}
