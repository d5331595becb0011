//! Error types for response and record validation.

use thiserror::Error;

/// Errors raised when a remote response violates the expected shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The response body is not a JSON object.
    #[error("response must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A required response field is absent.
    #[error("response field `{0}` is missing")]
    MissingField(&'static str),

    /// A response field is present but has the wrong type or value.
    #[error("response field `{field}` is invalid: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A homework record lacks a required field, or the field is empty.
    #[error("homework record #{index}: field `{field}` is missing or empty")]
    Record {
        /// Position of the record in the `homeworks` array.
        index: usize,
        /// Name of the missing or empty field.
        field: &'static str,
    },

    /// A homework status outside the documented set.
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

impl ValidationError {
    /// Name of the field (or container) the violation points at.
    ///
    /// Used to key duplicate-failure suppression, so it stays stable
    /// across records and free of run-specific detail.
    pub fn field(&self) -> &'static str {
        match *self {
            Self::NotAnObject(_) => "response",
            Self::MissingField(field) => field,
            Self::InvalidField { field, .. } => field,
            Self::Record { field, .. } => field,
            Self::UnknownStatus(_) => "status",
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
