//! # Database Schema Management
//!
//! The schema is embedded in the binary and applied idempotently at
//! startup. The unique index on `users.email` and the composite unique
//! constraint on `(user_id, org_id)` are the authoritative enforcement
//! points for the registration and membership invariants.

use tracing::info;

use crate::errors::{Error, Result};
use crate::storage::DbPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS organisations (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS memberships (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        org_id TEXT NOT NULL REFERENCES organisations(id) ON DELETE CASCADE,
        created_at TEXT NOT NULL,
        UNIQUE (user_id, org_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_memberships_user ON memberships(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_memberships_org ON memberships(org_id)",
];

/// Apply the embedded schema to the database.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| Error::database(e, "Failed to apply database schema"))?;
    }

    info!(statements = SCHEMA.len(), "Database schema applied");
    Ok(())
}
