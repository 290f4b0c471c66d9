//! # Storage Layer
//!
//! Persistence for users, organisations, and memberships backed by SQLx.
//! Uniqueness on `users.email` and on the `(user_id, org_id)` membership
//! pair is enforced by the schema, which makes the database the
//! authoritative arbiter when concurrent writes race past the application
//! level pre-checks.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use migrations::run_migrations;
pub use pool::{create_pool, DbPool};
