//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserRole};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing = super::parse_scoped_id("user", id)?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by email (emails are stored lowercase)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Whether any admin account exists (startup bootstrap check)
    pub async fn admin_exists(&self) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = 'admin' LIMIT 1")
            .await?;
        let admins: Vec<User> = result.take(0)?;
        Ok(!admins.is_empty())
    }

    /// Create a new user account
    pub async fn create(&self, data: UserCreate, role: UserRole) -> RepoResult<User> {
        let email = data.email.trim().to_lowercase();

        // Check duplicate email
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("User already exists".to_string()));
        }

        // Hash password
        let hash_pass = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let now = chrono::Utc::now().timestamp_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    name = $name,
                    email = $email,
                    hashPass = $hash_pass,
                    phone = $phone,
                    address = $address,
                    role = $role,
                    loyaltyPoints = 0,
                    favoriteItems = [],
                    lastLogin = NONE,
                    createdAt = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", email))
            .bind(("hash_pass", hash_pass))
            .bind(("phone", data.phone))
            .bind(("address", data.address))
            .bind(("role", role))
            .bind(("created_at", now))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Stamp a successful login
    pub async fn touch_last_login(&self, id: &RecordId) -> RepoResult<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.base
            .db()
            .query("UPDATE $thing SET lastLogin = $now")
            .bind(("thing", id.clone()))
            .bind(("now", now))
            .await?;
        Ok(())
    }

    /// Toggle a menu item in the favorites list, returning the new list
    pub async fn toggle_favorite(
        &self,
        user_id: &RecordId,
        item: RecordId,
    ) -> RepoResult<Vec<RecordId>> {
        let user: Option<User> = self.base.db().select(user_id.clone()).await?;
        let user =
            user.ok_or_else(|| RepoError::NotFound(format!("User {} not found", user_id)))?;

        let mut favorites = user.favorite_items;
        if let Some(pos) = favorites.iter().position(|f| f == &item) {
            favorites.remove(pos);
        } else {
            favorites.push(item);
        }

        // Favorites persist as "table:id" strings; models accept both forms
        let as_strings: Vec<String> = favorites.iter().map(|f| f.to_string()).collect();
        self.base
            .db()
            .query("UPDATE $thing SET favoriteItems = $favorites")
            .bind(("thing", user_id.clone()))
            .bind(("favorites", as_strings))
            .await?;

        Ok(favorites)
    }

    /// Update account fields (partial)
    ///
    /// `email` must already be lowercased by the caller. The hash only
    /// changes when a new one is supplied.
    pub async fn update_account(
        &self,
        user_id: &RecordId,
        name: Option<String>,
        email: Option<String>,
        hash_pass: Option<String>,
    ) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    email = $email OR email,
                    hashPass = IF $has_hash THEN $hash ELSE hashPass END
                RETURN AFTER"#,
            )
            .bind(("thing", user_id.clone()))
            .bind(("name", name))
            .bind(("email", email))
            .bind(("has_hash", hash_pass.is_some()))
            .bind(("hash", hash_pass))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", user_id)))
    }

    /// Apply a loyalty balance delta (spend negative, earn positive),
    /// returning the new balance
    pub async fn adjust_loyalty_points(&self, user_id: &RecordId, delta: i64) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET loyaltyPoints = loyaltyPoints + $delta RETURN AFTER")
            .bind(("thing", user_id.clone()))
            .bind(("delta", delta))
            .await?;

        let updated: Option<User> = result.take(0)?;
        updated
            .map(|u| u.loyalty_points)
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", user_id)))
    }
}
