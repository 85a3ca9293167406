//! Validation pipeline support.
//!
//! Request DTOs carry declarative `validator` rules; this module
//! supplies the custom rule functions, converts the accumulated
//! `ValidationErrors` into the structured [`FieldViolation`] list, and
//! generates the per-field remediation suggestions reported alongside
//! validation failures.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use gatehouse_core::error::AppError;
use gatehouse_core::types::violation::{FieldLocation, FieldViolation};

/// The closed set of accepted password special characters.
const PASSWORD_SPECIALS: &str = "@$!%*?&#";

/// Field names whose submitted values are never echoed back.
const SECRET_FIELDS: &[&str] = &["password", "confirmPassword"];

/// Password complexity rule: at least one letter, one digit, and one
/// special character. Length is enforced separately.
pub fn password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if has_letter && has_digit && has_special {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_complexity");
        err.message = Some(Cow::Borrowed(
            "Password must contain at least one letter, one number, and one special character",
        ));
        Err(err)
    }
}

/// Username charset rule: letters, digits, and underscores only.
pub fn username_charset(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_charset");
        err.message = Some(Cow::Borrowed(
            "Username can only contain letters, numbers, and underscores",
        ));
        Err(err)
    }
}

/// Converts accumulated validator errors into the wire violation list.
///
/// Rule evaluation short-circuits per field (only the first failing rule
/// is reported) but every field is covered, so the caller receives the
/// complete error set in one round trip. Violations are ordered by
/// field name; field names use their wire (camelCase) spelling; secret
/// field values are never echoed.
pub fn into_violations(errors: &ValidationErrors, location: FieldLocation) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, field_errors)| {
            let field = wire_name(field);
            let err = field_errors.first()?;

            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for field '{field}'"));

            let value = if SECRET_FIELDS.contains(&field.as_str()) {
                None
            } else {
                err.params.get("value").cloned()
            };

            Some(FieldViolation::new(field, message, value, location))
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Converts validator errors straight into a validation `AppError`.
pub fn into_app_error(errors: &ValidationErrors, location: FieldLocation) -> AppError {
    AppError::validation_failed(into_violations(errors, location))
}

/// Generates one remediation suggestion per violation.
pub fn suggestions_for(violations: &[FieldViolation]) -> Vec<String> {
    violations
        .iter()
        .map(|v| suggestion_for(&v.field))
        .collect()
}

/// Converts a Rust snake_case field name to its camelCase wire spelling.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn suggestion_for(field: &str) -> String {
    match field {
        "email" => "Email should be a valid email address (e.g., user@example.com)".to_string(),
        "password" | "confirmPassword" => {
            "Password should be at least 8 characters long and contain letters, numbers, and special characters"
                .to_string()
        }
        "username" => {
            "Username should be 3-20 characters long and contain only letters, numbers, and underscores"
                .to_string()
        }
        other => format!("Please check the {other} field and ensure it meets the requirements"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        #[validate(email(message = "Please provide a valid email address"))]
        email: String,
        #[validate(
            length(min = 8, message = "Password must be at least 8 characters long"),
            custom(function = password_complexity)
        )]
        password: String,
    }

    #[test]
    fn test_all_invalid_fields_reported_together() {
        let probe = Probe {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let errors = probe.validate().unwrap_err();
        let violations = into_violations(&errors, FieldLocation::Body);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "email");
        assert_eq!(violations[1].field, "password");
    }

    #[test]
    fn test_password_value_is_never_echoed() {
        let probe = Probe {
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
        };

        let errors = probe.validate().unwrap_err();
        let violations = into_violations(&errors, FieldLocation::Body);

        assert!(violations.iter().all(|v| v.field == "password"));
        assert!(violations.iter().all(|v| v.value.is_none()));
    }

    #[test]
    fn test_complexity_rule() {
        assert!(password_complexity("Abc12345!").is_ok());
        assert!(password_complexity("abcdefgh").is_err());
        assert!(password_complexity("12345678").is_err());
        assert!(password_complexity("abcd1234").is_err());
    }

    #[test]
    fn test_username_charset_rule() {
        assert!(username_charset("alice_01").is_ok());
        assert!(username_charset("alice-01").is_err());
        assert!(username_charset("alice 01").is_err());
    }

    #[test]
    fn test_field_names_use_wire_spelling() {
        assert_eq!(wire_name("confirm_password"), "confirmPassword");
        assert_eq!(wire_name("email"), "email");
        assert_eq!(wire_name("first_name"), "firstName");
    }

    #[test]
    fn test_suggestions_track_fields() {
        let violations = vec![
            FieldViolation::new("email", "bad", None, FieldLocation::Body),
            FieldViolation::new("nickname", "bad", None, FieldLocation::Body),
        ];
        let suggestions = suggestions_for(&violations);
        assert!(suggestions[0].contains("valid email address"));
        assert!(suggestions[1].contains("nickname"));
    }
}
