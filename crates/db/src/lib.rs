//! Postgres persistence for the weddit catalog.
//!
//! Pool construction, migrations, and repositories. Repositories are unit
//! structs with associated async functions taking `&PgPool`; entity rows
//! live in [`models`] and are assembled into `weddit-core` domain trees at
//! the repository boundary.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool type used across the workspace.
pub type DbPool = PgPool;

/// Create a connection pool against the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by startup and the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
