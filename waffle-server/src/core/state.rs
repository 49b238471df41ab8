use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::checkout::CheckoutEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::{UserCreate, UserRole};
use crate::db::repository::UserRepository;
use crate::services::HttpService;

/// Server state - shared handles to every service
///
/// Cloning is shallow; the database handle and the Arc-wrapped services
/// are shared between clones.
///
/// # Components
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
/// | http | HttpService | HTTP service |
/// | jwt_service | Arc<JwtService> | Token signing and validation |
/// | checkout | Arc<CheckoutEngine> | Order placement pipeline |
///
/// # Example
///
/// ```ignore
/// let db = state.get_db();
/// let order = state.checkout_engine().place_order(&user_id, request).await?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// HTTP service
    pub http: HttpService,
    /// JWT service (shared ownership)
    pub jwt_service: Arc<JwtService>,
    /// Checkout engine driving order placement
    pub checkout: Arc<CheckoutEngine>,
}

impl ServerState {
    /// Create server state (manual construction)
    ///
    /// Usually [`ServerState::initialize`] is used instead.
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        http: HttpService,
        jwt_service: Arc<JwtService>,
        checkout: Arc<CheckoutEngine>,
    ) -> Self {
        Self {
            config,
            db,
            http,
            jwt_service,
            checkout,
        }
    }

    /// Initialize server state
    ///
    /// In order:
    /// 1. Work directory layout (database/, logs/)
    /// 2. Database at work_dir/database/waffle.db, schema applied
    /// 3. Services (HTTP, JWT, checkout)
    /// 4. Late router initialization for the HTTP service
    /// 5. Admin account bootstrap on an empty user table
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created or the database
    /// fails to open.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("waffle.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let http = HttpService::new(config.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let checkout = Arc::new(CheckoutEngine::new(db.clone()));

        let state = Self::new(config.clone(), db, http.clone(), jwt_service, checkout);

        // Late initialization for HttpService (needs state)
        http.initialize(state.clone());

        state.bootstrap_admin().await;

        state
    }

    /// Create the admin account when none exists yet
    ///
    /// Reads ADMIN_EMAIL / ADMIN_PASSWORD / ADMIN_NAME from the
    /// environment. Failure is logged and does not stop startup.
    async fn bootstrap_admin(&self) {
        let repo = UserRepository::new(self.get_db());

        match repo.admin_exists().await {
            Ok(true) => {}
            Ok(false) => {
                let email = std::env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@waffles.com".into());
                let password = match std::env::var("ADMIN_PASSWORD") {
                    Ok(p) => p,
                    Err(_) => {
                        tracing::warn!(
                            "ADMIN_PASSWORD not set, bootstrapping admin with the default password"
                        );
                        "admin123".into()
                    }
                };
                let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".into());

                let data = UserCreate {
                    name,
                    email: email.clone(),
                    password,
                    phone: None,
                    address: None,
                };
                match repo.create(data, UserRole::Admin).await {
                    Ok(_) => tracing::info!("Admin account created: {}", email),
                    Err(e) => tracing::error!("Failed to create admin account: {}", e),
                }
            }
            Err(e) => tracing::error!("Failed to check for an admin account: {}", e),
        }
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the working directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Get the checkout engine
    pub fn checkout_engine(&self) -> &CheckoutEngine {
        &self.checkout
    }

    /// Get the HTTP service
    pub fn http_service(&self) -> &HttpService {
        &self.http
    }
}
