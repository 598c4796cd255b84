//! Error context for enriched error information.
//!
//! A storage failure during a notification cycle is logged, not raised, so
//! the log line has to carry enough to diagnose it on its own.

use chrono::{DateTime, Utc};

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Content item the failing cycle was triggered by, if any.
    pub content_id: Option<u64>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,

    /// Provider involved in the failure, if any.
    pub provider: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            content_id: None,
            timestamp: Utc::now(),
            component: None,
            provider: None,
        }
    }

    /// Set the content item id for this context.
    pub fn with_content_id(mut self, id: u64) -> Self {
        self.content_id = Some(id);
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the provider name for this context.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Get a formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];

        if let Some(id) = self.content_id {
            parts.push(format!("content_id={}", id));
        }

        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }

        if let Some(ref provider) = self.provider {
            parts.push(format!("provider={}", provider));
        }

        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));

        parts.join(" ")
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new("unknown")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.operation)?;

        if let Some(id) = self.content_id {
            write!(f, " content={}", id)?;
        }

        if let Some(ref provider) = self.provider {
            write!(f, " provider={}", provider)?;
        }

        Ok(())
    }
}
