use serde::{Deserialize, Serialize};

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    /// DNS, connection, timeout or cancellation. No response was received.
    TransportError,
    /// Non-success status without a decodable provider message.
    HttpError { code: u16 },
    /// 4xx with a message decoded from the provider's JSON body.
    ProviderError { message: String },
}

/// Result of one submission to one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub provider_name: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SubmissionOutcome {
    pub fn new(provider_name: impl Into<String>, status: OutcomeStatus) -> Self {
        Self {
            provider_name: provider_name.into(),
            status,
            detail: None,
        }
    }

    pub fn success(provider_name: impl Into<String>) -> Self {
        Self::new(provider_name, OutcomeStatus::Success)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.detail = (!detail.is_empty()).then_some(detail);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}
