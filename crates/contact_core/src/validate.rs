use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{FieldRole, FormField, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    InvalidFormat,
    TooShort,
}

/// A validation failure on a single field, carrying the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(field: &FormField, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.name().to_string(),
            kind,
            message: message.into(),
        }
    }
}

pub const MIN_NAME_CHARS: usize = 2;

/// Checks one field: required, then email shape, then name length.
pub fn validate_field(field: &FormField) -> Result<(), FieldError> {
    let value = field.value().trim();

    if field.is_required() && value.is_empty() {
        let message = format!("{} is required", field.display_label());
        return Err(FieldError::new(field, FieldErrorKind::Required, message));
    }

    if value.is_empty() {
        return Ok(());
    }

    match field.role() {
        FieldRole::Email if !is_valid_email(value) => Err(FieldError::new(
            field,
            FieldErrorKind::InvalidFormat,
            "Please enter a valid email address",
        )),
        FieldRole::PersonName if value.chars().count() < MIN_NAME_CHARS => Err(FieldError::new(
            field,
            FieldErrorKind::TooShort,
            "Name must be at least 2 characters long",
        )),
        _ => Ok(()),
    }
}

/// Validates every required field without stopping at the first failure.
///
/// Errors are returned in form order.
pub fn validate_form(form: &FormState) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = form
        .fields()
        .iter()
        .filter(|field| field.is_required())
        .filter_map(|field| validate_field(field).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `local@domain.tld` with no whitespace or extra `@` in any segment.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        for ok in ["a@b.c", "first.last@example.org", "x@sub.domain.io", "a@..c"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
        for bad in [
            "not-an-email",
            "@b.c",
            "a@b",
            "a@.c",
            "a@b.",
            "a b@c.d",
            "a@b@c.d",
            "a@b .c",
            "",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }
}
