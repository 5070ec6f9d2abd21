//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use nimbus_core::config::DatabaseConfig;
use nimbus_core::error::{AppError, ErrorKind};

/// Create a PostgreSQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to connect to PostgreSQL", e)
        })?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );
    Ok(pool)
}
