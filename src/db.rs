//! SQLite connection pool setup

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};

use crate::{config::DatabaseConfig, error::AppResult};

/// Embedded migrations, applied on every connect
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the database described by `config` and bring its schema up to date.
///
/// The file is created when missing. Foreign keys are enforced on every
/// connection of the pool.
pub async fn connect(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

/// Open a fresh in-memory database with the schema applied.
///
/// Every in-memory connection is its own database, so the pool is pinned to a
/// single connection that is never recycled.
pub async fn connect_in_memory() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

#[tracing::instrument(skip_all)]
async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations completed");
    Ok(())
}
