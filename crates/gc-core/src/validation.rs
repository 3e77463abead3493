//! Field-scoped validation errors shared by the onboarding forms.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One or more field errors from a single validation pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", format_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates errors across fields, then resolves to `Ok(value)` or the
/// collected errors.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn required_text(&mut self, field: &str, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, "required");
            return None;
        }
        Some(trimmed.to_string())
    }

    pub fn positive_number(&mut self, field: &str, value: &str) -> Option<f64> {
        match parse_positive_number(value) {
            Ok(n) => Some(n),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    pub fn required<T: Copy>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "required");
        }
        value
    }

    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(ValidationErrors(self.errors));
        }
        value().ok_or_else(|| ValidationErrors(vec![FieldError::new("form", "incomplete")]))
    }
}

/// Parse user input as a strictly positive, finite number.
///
/// A comma is accepted as decimal separator.
pub fn parse_positive_number(raw: &str) -> Result<f64, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("required");
    }
    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| "must be a number")?;
    if !value.is_finite() || value <= 0.0 {
        return Err("must be positive");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_comma() {
        assert_eq!(parse_positive_number("65,5"), Ok(65.5));
        assert_eq!(parse_positive_number(" 165 "), Ok(165.0));
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        assert_eq!(parse_positive_number(""), Err("required"));
        assert_eq!(parse_positive_number("abc"), Err("must be a number"));
        assert_eq!(parse_positive_number("0"), Err("must be positive"));
        assert_eq!(parse_positive_number("-3"), Err("must be positive"));
        assert_eq!(parse_positive_number("inf"), Err("must be positive"));
    }

    #[test]
    fn validator_collects_every_field() {
        let mut v = Validator::new();
        v.required_text("name", "  ");
        v.positive_number("weight", "x");
        let err = v.finish(|| Some(())).unwrap_err();
        assert!(err.has_field("name"));
        assert!(err.has_field("weight"));
        assert_eq!(err.0.len(), 2);
    }
}
