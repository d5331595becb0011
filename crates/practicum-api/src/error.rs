//! Error types for the Practicum API client.

use thiserror::Error;

/// Errors that can occur talking to the Practicum API.
///
/// None of these are fatal to the process; the polling loop logs them and
/// retries on the next cycle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("invalid Practicum API base url `{url}`: {reason}")]
    BaseUrl {
        /// The URL as configured.
        url: String,
        /// Parser's explanation.
        reason: String,
    },

    /// The API answered with a non-success status.
    #[error("Practicum API returned {http_status}: {message}")]
    Status {
        /// HTTP status code of the response.
        http_status: u16,
        /// Machine-readable error code, when the body carried one.
        code: Option<String>,
        /// Error message from the body, or the raw body text.
        message: String,
    },

    /// The request did not complete within the client timeout.
    #[error("Practicum API did not answer in time: service unavailable")]
    Timeout,

    /// The request failed below HTTP (DNS, connect, TLS).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A success response carried a body that is not valid JSON.
    #[error("Practicum API returned an unreadable body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The HTTP status to report for this failure, when one applies.
    ///
    /// Timeouts map to 504, following the upstream convention of treating
    /// a silent server as a gateway timeout.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { http_status, .. } => Some(*http_status),
            Self::Timeout => Some(504),
            _ => None,
        }
    }

    /// Machine-readable error code from the API body, when present.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
