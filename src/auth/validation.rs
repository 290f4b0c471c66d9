//! Request payload validation.
//!
//! Validation failures are caught at the boundary, before any service or
//! the authorization engine runs, and surface as a list of
//! `{ field, message }` pairs in a 422 response.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a request payload, collecting every field failure.
pub fn validate_request<T: Validate>(payload: &T) -> Result<(), Vec<FieldError>> {
    match payload.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(collect_field_errors(&errors)),
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut collected: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| FieldError {
                field: camel_case(field),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string()),
            })
        })
        .collect();

    // Deterministic ordering for clients and tests.
    collected.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    collected
}

/// Validator reports Rust field names; the API speaks camelCase, matching
/// the request payloads clients send.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize_next = false;
    for ch in field.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::RegisterRequest;

    #[test]
    fn collects_every_failing_field() {
        let request = RegisterRequest {
            first_name: "".into(),
            last_name: "".into(),
            email: "nope".into(),
            password: "abc".into(),
            phone: None,
        };

        let errors = validate_request(&request).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(fields, vec!["email", "firstName", "lastName", "password"]);
    }

    #[test]
    fn field_names_are_reported_in_camel_case() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("email"), "email");
        assert_eq!(camel_case("user_id"), "userId");
    }

    #[test]
    fn valid_payload_passes() {
        let request = RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "s3cret".into(),
            phone: None,
        };

        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn messages_come_from_the_declared_rules() {
        let request = RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "abc".into(),
            phone: None,
        };

        let errors = validate_request(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Password must be at least 5 characters long");
    }
}
