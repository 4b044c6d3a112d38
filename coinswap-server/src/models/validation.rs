//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field was not submitted
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field could not be parsed or is out of range
    InvalidValue { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidValue { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim and bound a free-text field. Blank input becomes `Empty`.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "comment",
            max: 1000,
        };
        assert_eq!(
            err.to_string(),
            "comment exceeds maximum length of 1000 characters"
        );

        let err = ValidationError::Missing { field: "coinId" };
        assert_eq!(err.to_string(), "coinId is required");
    }

    #[test]
    fn bounded_text_trims_and_limits() {
        assert_eq!(bounded_text("grade", "  VF-20 ", 32).unwrap(), "VF-20");
        assert_eq!(
            bounded_text("grade", "   ", 32),
            Err(ValidationError::Empty { field: "grade" })
        );
        assert!(matches!(
            bounded_text("grade", &"x".repeat(33), 32),
            Err(ValidationError::TooLong { max: 32, .. })
        ));
    }
}
