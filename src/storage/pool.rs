//! # Database Connection Pool Management
//!
//! Provides database connection pool creation for the SQLite backend.

use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    Pool, Sqlite,
};

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};

/// Type alias for the database connection pool
pub type DbPool = Pool<Sqlite>;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a database connection pool with the specified configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| Error::database(e, format!("Invalid SQLite connection string: {}", config.url)))?
        .create_if_missing(true)
        .busy_timeout(SQLITE_BUSY_TIMEOUT)
        .journal_mode(SqliteJournalMode::Wal)
        // Membership rows reference users and organisations; enforcement
        // must be on for every connection.
        .foreign_keys(true);

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, url = %config.url, "Failed to create database pool");
            Error::database(e, format!("Failed to connect to database: {}", config.url))
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}
