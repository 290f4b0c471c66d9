//! Authentication and authorization module entry point.
//!
//! This module exposes the identity stack for orggate: password hashing,
//! the JWT token service, user/organisation models, the registration and
//! login flows, the authorization engine, and the axum middleware that
//! resolves caller identity from bearer tokens.

pub mod authorization;
pub mod hashing;
pub mod jwt;
pub mod login_service;
pub mod middleware;
pub mod models;
pub mod organisation;
pub mod registration;
pub mod user;
pub mod validation;

pub use jwt::{Claims, TokenService};
pub use models::{AuthContext, AuthError};
pub use user::{LoginRequest, RegisterRequest, User};
