//! Network-related error types.
//!
//! Submissions never surface these as `Err`; the transport converts them into
//! a [`SubmissionOutcome`](crate::models::SubmissionOutcome) and uses the
//! error code and message here for the outcome detail and the log line.

use std::fmt;
use std::time::Duration;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the provider failed (DNS, refused, TLS).
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String, duration_secs: u64 },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Invalid or undecodable response.
    InvalidResponse { message: String },

    /// Request was cancelled before it completed.
    Cancelled,

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Convert a transport failure for `url` into a network error.
    ///
    /// `timeout` is the bound the request ran under and is only used to
    /// describe timeouts.
    pub fn from_http_error(err: &HttpError, url: &str, timeout: Duration) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message: message.clone(),
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
                duration_secs: timeout.as_secs(),
            },
            HttpError::Cancelled => NetworkError::Cancelled,
            HttpError::Io(message) | HttpError::InvalidUrl(message) | HttpError::Other(message) => {
                NetworkError::Other {
                    message: message.clone(),
                }
            }
        }
    }

    /// Categorize this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
            NetworkError::HttpStatus { .. } => ErrorCategory::Client,
            NetworkError::InvalidResponse { .. } => ErrorCategory::Server,
            _ => ErrorCategory::Network,
        }
    }

    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            NetworkError::Cancelled => false,
            other => other.category().is_retryable(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url, duration_secs } => {
                write!(f, "Request to '{}' timed out after {} seconds", url, duration_secs)
            }
            NetworkError::HttpStatus { status, message } => {
                if message.is_empty() {
                    write!(f, "HTTP {} error", status)
                } else {
                    write!(f, "HTTP {} error: {}", status, message)
                }
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
