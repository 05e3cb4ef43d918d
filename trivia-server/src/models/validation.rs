//! Validation error types

use std::fmt;

/// Validation error for request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank
    Empty { field: &'static str },

    /// Numeric field outside its accepted range
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Value could not be interpreted (e.g. "abc" for an integer)
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
