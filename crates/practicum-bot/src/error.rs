//! Watcher-level errors and their suppression signatures.

use practicum_api::ApiError;
use practicum_models::ValidationError;
use thiserror::Error;

use crate::notifier::NotifyError;

/// Any failure one poll cycle can produce.
///
/// Nothing here is fatal. The driver logs the error, announces it in the
/// chat unless it repeats, and retries on the next tick.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The remote API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body failed shape validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The notification could not be delivered.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Structural identity of a failure, used to suppress repeated alerts.
///
/// Signatures are built from stable fields only. Two transport errors
/// with different rendered messages, or two records tripping on the same
/// missing field, describe the same ongoing condition and compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureSignature {
    /// The API answered with an error, keyed by effective HTTP status and
    /// the machine-readable code when the body carried one.
    Remote {
        /// Effective HTTP status (504 for timeouts).
        status: u16,
        /// API error code, when present.
        code: Option<String>,
    },
    /// The API could not be reached at all.
    Transport,
    /// A success response carried an undecodable body.
    BadBody,
    /// The response shape was wrong, keyed by the offending field.
    Shape {
        /// Field (or container) that failed validation.
        field: &'static str,
    },
    /// A homework status outside the known set, keyed by the value.
    Status {
        /// The unrecognized status string.
        value: String,
    },
    /// The chat transport rejected the message.
    Delivery,
}

impl WatchError {
    /// Derives this error's suppression signature.
    pub fn signature(&self) -> FailureSignature {
        match self {
            Self::Api(e) => match e.http_status() {
                Some(status) => FailureSignature::Remote {
                    status,
                    code: e.code().map(str::to_string),
                },
                None => match e {
                    ApiError::Decode(_) => FailureSignature::BadBody,
                    _ => FailureSignature::Transport,
                },
            },
            Self::Validation(ValidationError::UnknownStatus(value)) => FailureSignature::Status {
                value: value.clone(),
            },
            Self::Validation(e) => FailureSignature::Shape { field: e.field() },
            Self::Notify(_) => FailureSignature::Delivery,
        }
    }
}

/// Result type for watcher operations.
pub type Result<T> = std::result::Result<T, WatchError>;
