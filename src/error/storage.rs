//! Key storage errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`KeyStore`](crate::traits::KeyStore).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    /// The backing store could not be read.
    #[error("Failed to read key store{}: {message}", display_path(.path))]
    ReadFailed {
        path: Option<PathBuf>,
        message: String,
    },

    /// The backing store could not be written.
    #[error("Failed to write key store{}: {message}", display_path(.path))]
    WriteFailed {
        path: Option<PathBuf>,
        message: String,
    },

    /// Stored data could not be decoded.
    #[error("Key store is corrupt: {0}")]
    Corrupt(String),

    /// The store is not reachable at all.
    #[error("Key store unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ReadFailed { .. } => "E_STORE_READ",
            StorageError::WriteFailed { .. } => "E_STORE_WRITE",
            StorageError::Corrupt(_) => "E_STORE_CORRUPT",
            StorageError::Unavailable(_) => "E_STORE_UNAVAILABLE",
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" '{}'", p.display()),
        None => String::new(),
    }
}
