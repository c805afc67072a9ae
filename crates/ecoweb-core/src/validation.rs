//! Field-level validation results shared by every form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as the form exposes it (e.g. `"name"`, `"cnpj"`).
    pub field: String,
    /// Human-readable message for display next to the field.
    pub message: String,
}

/// Ordered collection of field errors produced by a form's `validate()`.
///
/// Insertion order is preserved so the UI can show errors in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`. Only the first error per field is kept.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_some() {
            return;
        }
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Turns the collected errors into a result carrying `value` when empty.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Returns true when `value` has no non-whitespace characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Keeps only the ASCII digits of `value` ("12.345.678/0001-90" -> "12345678000190").
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "required");
        errors.add("name", "too long");
        errors.add("email", "invalid");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("required"));
        assert_eq!(errors.to_string(), "name: required; email: invalid");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));

        let mut errors = ValidationErrors::new();
        errors.add("x", "bad");
        assert!(errors.into_result(5).is_err());
    }

    #[test]
    fn test_helpers() {
        assert!(is_blank("  \t\n"));
        assert!(!is_blank(" a "));
        assert_eq!(digits_only("12.345.678/0001-90"), "12345678000190");
    }
}
