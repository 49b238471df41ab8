//! Database Module
//!
//! Embedded SurrealDB over RocksDB. Tables stay schemaless; the indexes
//! that back uniqueness guarantees are defined at startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Namespace and database selected on every connection
const NAMESPACE: &str = "waffle";
const DATABASE: &str = "waffle";

/// Index definitions applied at startup (idempotent)
const SCHEMA: &[&str] = &[
    // Account emails are unique
    "DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE",
    // Coupon codes are unique (stored uppercase)
    "DEFINE INDEX IF NOT EXISTS coupon_code ON coupon FIELDS code UNIQUE",
    // Pickup codes are unique across all orders; checkout re-rolls on collision
    "DEFINE INDEX IF NOT EXISTS order_pickup_code ON order FIELDS pickupCode UNIQUE",
    // Per-user order history
    "DEFINE INDEX IF NOT EXISTS order_user ON order FIELDS user",
];

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        for statement in SCHEMA {
            db.query(*statement)
                .await
                .map_err(|e| AppError::database(format!("Failed to apply schema: {}", e)))?;
        }
        tracing::info!("Database indexes applied");

        Ok(Self { db })
    }
}
