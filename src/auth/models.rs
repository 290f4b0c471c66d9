//! Request-scoped authentication types shared by the middleware and the
//! authorization engine.

use thiserror::Error;

use crate::domain::UserId;
use crate::errors::Error;

/// Request-scoped identity derived from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
}

impl AuthContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Errors returned by authentication middleware and the authorization engine.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized: bearer token missing")]
    MissingBearer,
    #[error("unauthorized: malformed bearer token")]
    MalformedBearer,
    #[error("unauthorized: invalid token")]
    InvalidToken,
    #[error("forbidden: access denied")]
    Forbidden,
    #[error(transparent)]
    Persistence(#[from] Error),
}
