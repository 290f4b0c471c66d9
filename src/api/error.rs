//! API error responses.
//!
//! One consistent status-code mapping per error kind: 401 for missing or
//! invalid credentials/tokens, 403 for denied access, 404 for absent
//! resources, 409 for uniqueness conflicts, 422 for field validation, 500
//! for everything internal.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::auth::models::AuthError;
use crate::auth::validation::FieldError;
use crate::errors::{AuthErrorType, Error};

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(Vec<FieldError>),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden<S: Into<String>>(msg: S) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ApiError::NotFound(msg.into())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status: &'static str,
    message: String,
    status_code: u16,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        match self {
            ApiError::UnprocessableEntity(errors) => {
                (status, Json(ValidationBody { errors })).into_response()
            }
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Internal(message) => (
                status,
                Json(ErrorBody { status: "error", message, status_code: status.as_u16() }),
            )
                .into_response(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Auth { message, error_type } => match error_type {
                AuthErrorType::Forbidden => ApiError::Forbidden(message),
                _ => ApiError::Unauthorized(message),
            },
            Error::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found", capitalize(&resource_type)))
            }
            Error::Conflict { message, .. } => ApiError::Conflict(message),
            Error::Database { context, .. } => ApiError::Internal(context),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::Internal { message, .. } => ApiError::Internal(message),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingBearer | AuthError::MalformedBearer | AuthError::InvalidToken => {
                ApiError::unauthorized("Authentication failed")
            }
            AuthError::Forbidden => ApiError::forbidden("Access denied"),
            AuthError::Persistence(inner) => ApiError::from(inner),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_uniform_401() {
        for err in [AuthError::MissingBearer, AuthError::MalformedBearer, AuthError::InvalidToken]
        {
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status_code(), StatusCode::UNAUTHORIZED);
            match api_err {
                ApiError::Unauthorized(message) => assert_eq!(message, "Authentication failed"),
                other => panic!("expected Unauthorized, got {:?}", other),
            }
        }
    }

    #[test]
    fn forbidden_is_distinguishable_from_unauthorized() {
        let api_err = ApiError::from(AuthError::Forbidden);
        assert_eq!(api_err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_formats_resource_type() {
        let api_err = ApiError::from(Error::not_found("user", "abc"));
        match api_err {
            ApiError::NotFound(message) => assert_eq!(message, "User not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn conflict_keeps_its_message() {
        let api_err = ApiError::from(Error::conflict("Registration unsuccessful", "user"));
        assert_eq!(api_err.status_code(), StatusCode::CONFLICT);
        match api_err {
            ApiError::Conflict(message) => assert_eq!(message, "Registration unsuccessful"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }
}
