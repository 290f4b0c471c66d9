//! # Configuration Management
//!
//! Environment-driven configuration for the orggate service. The JWT
//! signing secret is process-wide, read-only configuration injected at
//! startup; it is never mutated at runtime.

use crate::errors::{Error, Result};

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 3000 }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection string, e.g. `sqlite://orggate.db`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: "sqlite://orggate.db".to_string(), max_connections: 5 }
    }
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: one hour)
    pub token_ttl_secs: i64,
    /// When true, only existing members of an organisation may add users to
    /// it. The default preserves the permissive observed behavior where any
    /// authenticated caller may add any user to any organisation.
    pub require_membership_to_add: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 3600,
            require_membership_to_add: false,
        }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("ORGGATE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid server port: {}", e)))?;

        let bind_address =
            std::env::var("ORGGATE_BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://orggate.db".to_string());

        let max_connections = std::env::var("ORGGATE_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid max connections: {}", e)))?;

        let jwt_secret = std::env::var("ORGGATE_JWT_SECRET")
            .map_err(|_| Error::config("ORGGATE_JWT_SECRET must be set"))?;
        if jwt_secret.len() < 16 {
            return Err(Error::config("ORGGATE_JWT_SECRET must be at least 16 bytes"));
        }

        let token_ttl_secs = std::env::var("ORGGATE_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid token TTL: {}", e)))?;

        let require_membership_to_add = std::env::var("ORGGATE_REQUIRE_MEMBERSHIP_TO_ADD")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            server: ServerConfig { bind_address, port },
            database: DatabaseConfig { url: database_url, max_connections },
            auth: AuthConfig { jwt_secret, token_ttl_secs, require_membership_to_add },
        })
    }
}
