//! Persistence layer: connection provider, entities, and repositories.
//!
//! Reads go through [`materialize`] (one joined query per call, decoded by
//! column name). Writes go through [`unit_of_work`] (load, mutate, save,
//! commit in a single transaction).

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod mapping;
pub mod materialize;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod unit_of_work;

pub use config::{ConfigError, DbConfig, ReadStrategy};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from resolved database configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
