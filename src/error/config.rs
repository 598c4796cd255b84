//! Configuration errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A provider base URL is not an absolute http(s) URL.
    #[error("Provider '{name}' has an invalid base URL '{url}': {reason}")]
    InvalidProviderUrl {
        name: String,
        url: String,
        reason: String,
    },

    /// A provider name is empty or repeated.
    #[error("Invalid provider name '{0}'")]
    InvalidProviderName(String),

    /// The site URL is not an absolute http(s) URL.
    #[error("Invalid site URL '{url}': {reason}")]
    InvalidSiteUrl { url: String, reason: String },

    /// The configuration file exists but could not be read.
    #[error("Failed to read config file '{}': {message}", show_path(.path))]
    ReadFailed { path: PathBuf, message: String },

    /// The configuration file could not be parsed.
    #[error("Failed to parse config file '{}': {message}", show_path(.path))]
    ParseFailed { path: PathBuf, message: String },

    /// An environment override or setting has an unusable value.
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    /// No home directory to derive default paths from.
    #[error("Could not determine the home directory")]
    NoHomeDirectory,
}

fn show_path(path: &Path) -> String {
    path.display().to_string()
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidProviderUrl { .. } => "E_CFG_PROVIDER_URL",
            ConfigError::InvalidProviderName(_) => "E_CFG_PROVIDER_NAME",
            ConfigError::InvalidSiteUrl { .. } => "E_CFG_SITE_URL",
            ConfigError::ReadFailed { .. } => "E_CFG_READ",
            ConfigError::ParseFailed { .. } => "E_CFG_PARSE",
            ConfigError::InvalidValue { .. } => "E_CFG_VALUE",
            ConfigError::NoHomeDirectory => "E_CFG_HOME",
        }
    }
}
