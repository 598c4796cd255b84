//! Error category classification for unified error handling.
//!
//! Categories drive log levels and tell an operator where to look: the
//! network, a provider, the local key store or the configuration.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (connection, DNS, timeout).
    /// Generally transient.
    Network,

    /// Provider-side errors (HTTP 5xx).
    /// Generally transient.
    Server,

    /// The provider rejected the request (HTTP 4xx).
    /// Indicates a bad key, a host mismatch or a malformed URL list.
    Client,

    /// Local system errors (key store unreadable or unwritable).
    System,

    /// Configuration errors (invalid provider URL, unreadable config file).
    /// Not recoverable until the configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// Nothing in the notifier retries on its own; this only informs logs.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check outbound connectivity to the provider",
            ErrorCategory::Server => {
                "The provider may be experiencing issues. The next publish event will try again"
            }
            ErrorCategory::Client => {
                "Check that the key file is reachable and the site URL matches the submitted host"
            }
            ErrorCategory::System => "Check key store file permissions and available disk space",
            ErrorCategory::Configuration => "Check your configuration settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Network.as_str(), "network");
        assert_eq!(ErrorCategory::Server.as_str(), "server");
        assert_eq!(ErrorCategory::Client.as_str(), "client");
        assert_eq!(ErrorCategory::System.as_str(), "system");
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::System), "system");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("connectivity"));
        assert!(ErrorCategory::Client.recovery_hint().contains("key file"));
        assert!(ErrorCategory::System.recovery_hint().contains("permissions"));
    }
}
