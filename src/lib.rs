//! # Orggate
//!
//! Orggate is a multi-tenant identity and access-control service. It
//! authenticates users with email/password credentials, issues signed
//! time-bound bearer tokens, and decides whether a caller may read a user
//! or organisation record based on self-identity and organisation
//! membership.
//!
//! ## Architecture
//!
//! The system follows a layered architecture pattern:
//!
//! ```text
//! REST API Layer → Auth Services → Authorization Engine
//!      ↓               ↓                  ↓
//! Validation      Token Service    Membership Directory
//!                       ↓                  ↓
//!                 Persistence Layer (SQLx)
//! ```
//!
//! ## Core Components
//!
//! - **Credential manager**: Argon2id password hashing and verification
//! - **Token service**: HS256 JWT issue/verify with a fixed TTL
//! - **Membership directory**: user ↔ organisation relation queries
//! - **Authorization engine**: self-access and shared-organisation policy
//! - **Registration/login flow**: transactional onboarding with a default
//!   organisation per new user

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
