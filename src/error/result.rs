//! Result type alias for notifier operations.

use super::config::ConfigError;
use super::context::ErrorContext;
use super::indexnow_error::IndexNowError;
use super::storage::StorageError;

/// Type alias for Results using IndexNowError.
pub type IndexNowResult<T> = Result<T, IndexNowError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> IndexNowResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> IndexNowResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T> ResultExt<T> for IndexNowResult<T> {
    fn context(self, ctx: ErrorContext) -> IndexNowResult<T> {
        self.map_err(|e| e.with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> IndexNowResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for Result<T, StorageError> {
    fn context(self, ctx: ErrorContext) -> IndexNowResult<T> {
        self.map_err(|e| IndexNowError::from(e).with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> IndexNowResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| IndexNowError::from(e).with_context(f()))
    }
}

impl<T> ResultExt<T> for Result<T, ConfigError> {
    fn context(self, ctx: ErrorContext) -> IndexNowResult<T> {
        self.map_err(|e| IndexNowError::from(e).with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> IndexNowResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| IndexNowError::from(e).with_context(f()))
    }
}
