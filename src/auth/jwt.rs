//! JWT utilities for orggate bearer tokens.
//!
//! Tokens are HS256-signed and carry `{ sub, iat, exp }` where `sub` is the
//! user's stable unique identifier. Verification is pure and stateless:
//! no I/O, no mutation, and a single opaque failure outcome so callers
//! cannot distinguish a bad signature from a malformed token or expiry.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::models::AuthError;
use crate::domain::UserId;
use crate::errors::{Error, Result};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at time (unix seconds)
    pub iat: i64,
}

/// Service for issuing and verifying signed identity tokens.
///
/// The signing key is process-wide configuration, never request data.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with the given secret and lifetime.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::default();
        // Expiry is exact: a token is invalid from the instant exp passes.
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    /// Issue a signed token identifying the given user.
    pub fn issue(&self, user_id: &UserId) -> Result<String> {
        let now = chrono::Utc::now().timestamp();
        let claims =
            Claims { sub: user_id.as_str().to_string(), exp: now + self.ttl_secs, iat: now };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with the same [`AuthError::InvalidToken`] for a bad signature,
    /// a malformed token, and an expired token.
    pub fn verify(&self, token: &str) -> std::result::Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)?;

        // jsonwebtoken treats exp == now as still valid; the contract here
        // is that a token is invalid from the instant exp is reached.
        if claims.exp <= chrono::Utc::now().timestamp() {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-at-least-16-bytes";

    #[test]
    fn round_trip_preserves_subject() {
        let service = TokenService::new(SECRET, 3600);
        let user_id = UserId::new();

        let token = service.issue(&user_id).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.as_str());
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = TokenService::new(SECRET, -5);
        let token = service.issue(&UserId::new()).unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn token_is_invalid_from_the_expiry_instant() {
        // ttl 0 makes exp == iat: already invalid the moment it is issued.
        let service = TokenService::new(SECRET, 0);
        let token = service.issue(&UserId::new()).unwrap();

        assert!(matches!(service.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issuer = TokenService::new(SECRET, 3600);
        let verifier = TokenService::new(b"a-completely-different-secret", 3600);

        let token = issuer.issue(&UserId::new()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_input_is_invalid_not_a_panic() {
        let service = TokenService::new(SECRET, 3600);

        for garbage in ["", "not-a-jwt", "a.b", "a.b.c.d", "Bearer abc"] {
            assert!(matches!(service.verify(garbage), Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue(&UserId::new()).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let tampered_payload = "eyJzdWIiOiJldmlsIn0";
        parts[1] = tampered_payload;
        let tampered = parts.join(".");

        assert!(matches!(service.verify(&tampered), Err(AuthError::InvalidToken)));
    }
}
