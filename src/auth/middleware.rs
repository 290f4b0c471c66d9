//! Axum middleware for authenticating requests from bearer tokens.
//!
//! A missing or malformed `Authorization` header short-circuits to 401
//! without ever handing garbage to the token service, and the token
//! service itself rejects malformed input rather than panicking, so the
//! middleware never crashes the request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{field, info_span, warn, Instrument};

use crate::api::error::ApiError;
use crate::auth::jwt::TokenService;
use crate::auth::models::{AuthContext, AuthError};
use crate::domain::UserId;

pub type TokenServiceState = Arc<TokenService>;

/// Middleware entry point that authenticates requests using the configured
/// [`TokenService`].
pub async fn authenticate(
    State(token_service): State<TokenServiceState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %method,
        http.path = %path,
        auth.user_id = field::Empty,
    );
    let header =
        request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()).unwrap_or("");

    match span.in_scope(|| resolve_bearer(&token_service, header)) {
        Ok(context) => {
            span.record("auth.user_id", field::display(&context.user_id));
            request.extensions_mut().insert(context);
            Ok(next.run(request).instrument(span).await)
        }
        Err(err) => {
            span.in_scope(|| warn!(error = %err, "authentication failed"));
            Err(ApiError::from(err))
        }
    }
}

/// Resolve a caller identity from the raw `Authorization` header value.
fn resolve_bearer(
    token_service: &TokenService,
    header: &str,
) -> Result<AuthContext, AuthError> {
    if header.is_empty() {
        return Err(AuthError::MissingBearer);
    }

    let token = header.strip_prefix("Bearer ").ok_or(AuthError::MalformedBearer)?.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedBearer);
    }

    let claims = token_service.verify(token)?;
    Ok(AuthContext::new(UserId::from_string(claims.sub)))
}
