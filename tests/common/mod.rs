//! Shared helpers for integration tests: an isolated in-memory database
//! per test, wired into the real SQLx repositories and services.

#![allow(dead_code)]

use orggate::api::AppState;
use orggate::auth::user::RegisterRequest;
use orggate::config::{AuthConfig, DatabaseConfig};
use orggate::storage::{create_pool, run_migrations, DbPool};

pub const TEST_SECRET: &str = "integration-test-secret-value";

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single connection keeps the in-memory database alive and shared for
/// the lifetime of the pool.
pub async fn test_pool() -> DbPool {
    let config = DatabaseConfig { url: "sqlite::memory:".to_string(), max_connections: 1 };
    let pool = create_pool(&config).await.expect("create test pool");
    run_migrations(&pool).await.expect("apply schema");
    pool
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
        require_membership_to_add: false,
    }
}

pub async fn test_state() -> AppState {
    AppState::new(test_pool().await, &auth_config())
}

pub fn register_request(first_name: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        password: "p4ssword".to_string(),
        phone: None,
    }
}
