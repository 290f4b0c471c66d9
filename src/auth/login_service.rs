//! Login service for email/password authentication.

use std::sync::{Arc, LazyLock};

use tracing::{info, instrument, warn};

use crate::auth::hashing;
use crate::auth::jwt::TokenService;
use crate::auth::user::{LoginRequest, User};
use crate::errors::{AuthErrorType, Error, Result};
use crate::storage::repositories::UserRepository;

/// Pre-computed dummy hash for timing-safe user enumeration prevention.
/// When a non-existent email is used, we still run Argon2 verification
/// against this hash so the response time matches real verification.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| {
    hashing::hash_password("dummy_startup_value")
        .unwrap_or_else(|_| "$argon2id$v=19$m=768,t=1,p=1$dW5rbm93bg$dW5rbm93bg".to_string())
});

/// Service for handling email/password authentication.
#[derive(Clone)]
pub struct LoginService {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<TokenService>,
}

impl LoginService {
    pub fn new(user_repository: Arc<dyn UserRepository>, token_service: Arc<TokenService>) -> Self {
        Self { user_repository, token_service }
    }

    /// Authenticate with email and password, returning the user and a
    /// fresh bearer token.
    ///
    /// # Errors
    ///
    /// Unknown email and wrong password both return the identical
    /// `Unauthorized` ("Authentication failed") outcome, so responses do
    /// not leak which emails are registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<(User, String)> {
        let email = User::normalize_email(&request.email);

        let (user, password_hash) =
            match self.user_repository.get_user_with_password(&email).await? {
                Some(found) => found,
                None => {
                    // Keep timing in line with the real verification path.
                    if let Err(e) = hashing::verify_password(&request.password, &DUMMY_HASH) {
                        warn!(error = %e, "dummy hash verification failed unexpectedly");
                    }
                    warn!("login attempt for non-existent user");
                    return Err(Error::auth(
                        "Authentication failed",
                        AuthErrorType::InvalidCredentials,
                    ));
                }
            };

        if !hashing::verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "login attempt with incorrect password");
            return Err(Error::auth("Authentication failed", AuthErrorType::InvalidCredentials));
        }

        let token = self.token_service.issue(&user.id)?;

        info!(user_id = %user.id, "user logged in successfully");
        Ok((user, token))
    }
}
