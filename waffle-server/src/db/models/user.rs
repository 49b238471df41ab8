//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

/// User model matching the account store
///
/// Timestamps are Unix millis. The password hash never serializes;
/// it is written through explicit query binds only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub loyalty_points: i64,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub favorite_items: Vec<RecordId>,
    #[serde(default)]
    pub last_login: Option<i64>,
    #[serde(default)]
    pub created_at: i64,
}

/// Register payload
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = User::hash_password("butter&syrup").unwrap();
        let user = User {
            id: None,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            hash_pass: hash,
            phone: None,
            address: None,
            role: UserRole::Customer,
            loyalty_points: 0,
            favorite_items: Vec::new(),
            last_login: None,
            created_at: 0,
        };
        assert!(user.verify_password("butter&syrup").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_hash_never_serializes() {
        let user = User {
            id: None,
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            hash_pass: "$argon2id$secret".to_string(),
            phone: None,
            address: None,
            role: UserRole::Admin,
            loyalty_points: 42,
            favorite_items: Vec::new(),
            last_login: None,
            created_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("hashPass"));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(json.contains("\"loyaltyPoints\":42"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let user: User = serde_json::from_str(
            r#"{"name":"A","email":"a@b.c","hashPass":"h"}"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.loyalty_points, 0);
        assert!(user.favorite_items.is_empty());
    }
}
