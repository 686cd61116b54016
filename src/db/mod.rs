//! Database layer: pool configuration, connection management, and the user
//! repository.

mod config;
mod models;
mod repository;

pub use config::{DbConfig, DbConfigError, TlsContext};
pub use models::{UpdateUserFields, User};
pub use repository::UserRepository;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use crate::error::AppError;

/// Combined database context owning the repository and the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pub users: UserRepository,
    pool: MySqlPool,
}

impl Database {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database health by executing a simple query.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

/// Create the connection pool from a resolved configuration.
///
/// Saturated-pool acquires queue (fairly, with no queue-length bound) until
/// the configured acquire timeout rather than failing immediately.
pub async fn create_pool(config: &DbConfig) -> Result<MySqlPool, AppError> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options())
        .await
        .map_err(|e| AppError::Unavailable(format!("Database connection failed: {e}")))
}

/// Acquire one pooled connection and round-trip a ping, releasing the
/// connection back to the pool on drop.
///
/// Runs before the listener binds; a failure here aborts startup.
pub async fn verify_connection(pool: &MySqlPool) -> Result<(), AppError> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(|e| AppError::Unavailable(format!("Database connection failed: {e}")))?;

    conn.ping()
        .await
        .map_err(|e| AppError::Unavailable(format!("Database ping failed: {e}")))?;

    Ok(())
}
