//! Unified error type for the notifier.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::storage::StorageError;

/// Unified error type for all fallible operations outside the submission
/// path.
///
/// Submissions themselves never fail: they produce a
/// [`SubmissionOutcome`](crate::models::SubmissionOutcome). What can fail is
/// key storage, configuration and the verification server.
#[derive(Debug)]
pub enum IndexNowError {
    /// Key storage failure.
    Storage(StorageError),

    /// Configuration failure.
    Config(ConfigError),

    /// Server socket failure (bind, accept).
    Io { operation: String, message: String },

    /// Error with attached context.
    WithContext {
        error: Box<IndexNowError>,
        context: ErrorContext,
    },
}

impl IndexNowError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            IndexNowError::Storage(_) => ErrorCategory::System,
            IndexNowError::Config(_) => ErrorCategory::Configuration,
            IndexNowError::Io { .. } => ErrorCategory::System,
            IndexNowError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            IndexNowError::Storage(StorageError::Unavailable(_)) => true,
            IndexNowError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            IndexNowError::Storage(err) => err.error_code(),
            IndexNowError::Config(err) => err.error_code(),
            IndexNowError::Io { .. } => "E_SYS_IO",
            IndexNowError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            IndexNowError::WithContext { error, context } => {
                format!("{}\n\nContext: {}", error.user_message(), context)
            }
            other => format!("{}\nHint: {}", other, other.recovery_hint()),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        IndexNowError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            IndexNowError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl fmt::Display for IndexNowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexNowError::Storage(err) => write!(f, "{}", err),
            IndexNowError::Config(err) => write!(f, "{}", err),
            IndexNowError::Io { operation, message } => {
                write!(f, "Failed to {}: {}", operation, message)
            }
            IndexNowError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for IndexNowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexNowError::Storage(err) => Some(err),
            IndexNowError::Config(err) => Some(err),
            IndexNowError::Io { .. } => None,
            IndexNowError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<StorageError> for IndexNowError {
    fn from(err: StorageError) -> Self {
        IndexNowError::Storage(err)
    }
}

impl From<ConfigError> for IndexNowError {
    fn from(err: ConfigError) -> Self {
        IndexNowError::Config(err)
    }
}
