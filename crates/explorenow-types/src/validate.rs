//! Draft validation

use thiserror::Error;

/// A draft failed a field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Field-level checks run on inbound drafts before they reach storage.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be a non-negative number"));
    }
    Ok(())
}

/// Listing ratings are averages on a 0-5 scale.
pub(crate) fn listing_rating(value: f64) -> Result<(), ValidationError> {
    if !(0.0..=5.0).contains(&value) {
        return Err(ValidationError::new("rating", "must be between 0 and 5"));
    }
    Ok(())
}

pub(crate) fn optional<T>(
    value: &Option<T>,
    check: impl FnOnce(&T) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(non_empty("name", "  ").is_err());
        assert!(non_empty("name", "Goa").is_ok());
    }

    #[test]
    fn test_non_negative_rejects_nan() {
        assert!(non_negative("price", f64::NAN).is_err());
        assert!(non_negative("price", -1.0).is_err());
        assert!(non_negative("price", 0.0).is_ok());
    }

    #[test]
    fn test_error_display_names_field() {
        let err = ValidationError::new("email", "must contain '@'");
        assert_eq!(err.to_string(), "email: must contain '@'");
    }
}
