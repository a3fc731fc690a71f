//! Sign-up and login input checks producing per-field messages.

use serde_json::{Map, Value};
use validator::ValidateEmail;

use screams_core::error::AppError;

const MUST_NOT_BE_EMPTY: &str = "Must not be empty";

/// Path segments under `/users` that a handle would shadow.
const RESERVED_HANDLES: [&str; 1] = ["image"];

/// Collects field errors; converts into a single validation error.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Map<String, Value>,
}

impl FieldErrors {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field` unless one is already recorded.
    pub fn add(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| Value::String(message.to_string()));
    }

    /// Records an error if `value` is blank. Returns whether it was blank.
    pub fn require(&mut self, field: &str, value: &str) -> bool {
        let blank = value.trim().is_empty();
        if blank {
            self.add(field, MUST_NOT_BE_EMPTY);
        }
        blank
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when empty, else a validation error carrying every message.
    pub fn into_result(self, message: &str) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(message).with_details(Value::Object(self.errors)))
        }
    }
}

/// Checks sign-up fields.
pub fn validate_signup(
    email: &str,
    password: &str,
    confirm_password: &str,
    handle: &str,
) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    if !errors.require("email", email) && !email.trim().validate_email() {
        errors.add("email", "Must be a valid email address");
    }
    errors.require("password", password);
    if password != confirm_password {
        errors.add("confirmPassword", "Passwords must match");
    }
    if !errors.require("handle", handle) {
        if !handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            errors.add(
                "handle",
                "Must contain only letters, digits, '_' or '-'",
            );
        } else if RESERVED_HANDLES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(handle))
        {
            errors.add("handle", "This handle is not available");
        }
    }

    errors.into_result("Invalid sign-up data")
}

/// Checks login fields.
pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    errors.require("email", email);
    errors.require("password", password);
    errors.into_result("Invalid login data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use screams_core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup("a@example.com", "pw", "pw", "alice").is_ok());
    }

    #[test]
    fn test_signup_collects_every_field() {
        let err = validate_signup("", "", "x", " ").expect_err("invalid");
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(
            err.details,
            Some(json!({
                "email": "Must not be empty",
                "password": "Must not be empty",
                "confirmPassword": "Passwords must match",
                "handle": "Must not be empty"
            }))
        );
    }

    #[test]
    fn test_signup_bad_email() {
        let err = validate_signup("not-an-email", "pw", "pw", "alice").expect_err("invalid");
        assert_eq!(
            err.details,
            Some(json!({ "email": "Must be a valid email address" }))
        );
    }

    #[test]
    fn test_signup_rejects_route_handles() {
        let err = validate_signup("a@example.com", "pw", "pw", "image").expect_err("reserved");
        assert_eq!(
            err.details,
            Some(json!({ "handle": "This handle is not available" }))
        );

        for handle in ["a/b", "..", "al ice", "bob?x"] {
            let err = validate_signup("a@example.com", "pw", "pw", handle).expect_err("charset");
            assert_eq!(
                err.details,
                Some(json!({ "handle": "Must contain only letters, digits, '_' or '-'" }))
            );
        }

        assert!(validate_signup("a@example.com", "pw", "pw", "image_fan-2").is_ok());
    }

    #[test]
    fn test_login_requires_fields() {
        let err = validate_login("", "pw").expect_err("invalid");
        assert_eq!(err.details, Some(json!({ "email": "Must not be empty" })));
    }
}
