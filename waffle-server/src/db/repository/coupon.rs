//! Coupon Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Coupon, CouponCreate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all coupons, newest first (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(coupons)
    }

    /// Find coupon by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Coupon>> {
        let thing = super::parse_scoped_id("coupon", id)?;
        let coupon: Option<Coupon> = self.base.db().select(thing).await?;
        Ok(coupon)
    }

    /// Find coupon by code (case-insensitive, codes stored uppercase)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let code_owned = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let coupons: Vec<Coupon> = result.take(0)?;
        Ok(coupons.into_iter().next())
    }

    /// Find a coupon that is active and unexpired at `now_millis`
    pub async fn find_usable(&self, code: &str, now_millis: i64) -> RepoResult<Option<Coupon>> {
        let code_owned = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM coupon WHERE code = $code AND isActive = true AND expiresAt > $now LIMIT 1",
            )
            .bind(("code", code_owned))
            .bind(("now", now_millis))
            .await?;
        let coupons: Vec<Coupon> = result.take(0)?;
        Ok(coupons.into_iter().next())
    }

    /// Create a new coupon (code stored uppercase)
    pub async fn create(&self, data: CouponCreate, created_by: RecordId) -> RepoResult<Coupon> {
        let code = data.code.trim().to_uppercase();

        // Check duplicate code
        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Coupon code already exists".to_string(),
            ));
        }

        let now = chrono::Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE coupon SET
                    code = $code,
                    discountPercent = $discount_percent,
                    isActive = true,
                    expiresAt = $expires_at,
                    createdBy = $created_by,
                    createdAt = $created_at
                RETURN AFTER"#,
            )
            .bind(("code", code))
            .bind(("discount_percent", data.discount_percent))
            .bind(("expires_at", data.expires_at))
            .bind(("created_by", created_by))
            .bind(("created_at", now))
            .await?;

        let created: Option<Coupon> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create coupon".to_string()))
    }

    /// Flip the active flag, returning the updated coupon
    pub async fn toggle_active(&self, id: &str) -> RepoResult<Coupon> {
        let thing = super::parse_scoped_id("coupon", id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", id)))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET isActive = $is_active RETURN AFTER")
            .bind(("thing", thing))
            .bind(("is_active", !existing.is_active))
            .await?;

        result
            .take::<Option<Coupon>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", id)))
    }

    /// Hard delete a coupon
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = super::parse_scoped_id("coupon", id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
