//! One submission to one provider, classified into a [`SubmissionOutcome`].
//!
//! Nothing in here returns `Err`. Every failure mode of a submission, from a
//! refused connection to a provider rejecting the key, ends up as an outcome
//! the caller can log.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::cancel::CancelSignal;
use crate::error::NetworkError;
use crate::models::{OutcomeStatus, Provider, SubmissionOutcome, SubmissionPayload};
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Default bound on a single submission.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest response body kept in an outcome's detail.
const MAX_DETAIL_LEN: usize = 512;

/// Error body some providers return on 4xx.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Submits payloads over an [`HttpClient`].
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl Transport {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `{host, key, keyLocation, urlList: [url]}` to the provider.
    pub async fn submit(
        &self,
        provider: &Provider,
        site_url: &str,
        url: &str,
        key: &str,
        cancel: &CancelSignal,
    ) -> SubmissionOutcome {
        let endpoint = provider.submission_url();
        let payload = SubmissionPayload::new(site_url, url, key);

        let body = match serde_json::to_string(&payload) {
            Ok(body) => body,
            Err(e) => {
                return SubmissionOutcome::new(provider.name(), OutcomeStatus::TransportError)
                    .with_detail(format!("Failed to encode payload: {}", e))
            }
        };

        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        );

        let request = self.http.post(&endpoint, &body, &headers);
        let request = tokio::time::timeout(self.timeout, request);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(HttpError::Cancelled),
            result = request => {
                result.unwrap_or_else(|_| {
                    Err(HttpError::Timeout(format!("no response from {}", endpoint)))
                })
            }
        };

        let outcome = classify(provider.name(), &endpoint, result, self.timeout);
        log_outcome(&outcome, url);
        outcome
    }
}

/// Map a transport result to an outcome.
///
/// | result | outcome |
/// |---|---|
/// | transport failure | `transport_error` |
/// | 2xx | `success` |
/// | 4xx with `message`/`error` in a JSON body | `provider_error` |
/// | anything else | `http_error{code}` |
pub fn classify(
    provider_name: &str,
    endpoint: &str,
    result: Result<Response, HttpError>,
    timeout: Duration,
) -> SubmissionOutcome {
    let response = match result {
        Ok(response) => response,
        Err(HttpError::Cancelled) => {
            return SubmissionOutcome::new(provider_name, OutcomeStatus::TransportError)
                .with_detail("cancelled")
        }
        Err(e) => {
            let err = NetworkError::from_http_error(&e, endpoint, timeout);
            return SubmissionOutcome::new(provider_name, OutcomeStatus::TransportError)
                .with_detail(err.to_string());
        }
    };

    if response.is_success() {
        return SubmissionOutcome::success(provider_name);
    }

    let status = response.status;
    if (400..500).contains(&status) {
        if let Some(message) = provider_message(&response) {
            return SubmissionOutcome::new(provider_name, OutcomeStatus::ProviderError { message });
        }
    }

    let body = response.text().unwrap_or_default();
    SubmissionOutcome::new(provider_name, OutcomeStatus::HttpError { code: status })
        .with_detail(truncate(body.trim()))
}

/// Decoded error message from a provider's JSON body.
fn provider_message(response: &Response) -> Option<String> {
    let body: ProviderErrorBody = response.json().ok()?;
    body.message
        .or(body.error)
        .filter(|message| !message.trim().is_empty())
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_DETAIL_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn log_outcome(outcome: &SubmissionOutcome, url: &str) {
    match &outcome.status {
        OutcomeStatus::Success => {
            info!(provider = %outcome.provider_name, url, "Submitted URL");
        }
        OutcomeStatus::TransportError => {
            warn!(
                provider = %outcome.provider_name,
                url,
                detail = outcome.detail.as_deref().unwrap_or_default(),
                "Submission failed before a response"
            );
        }
        OutcomeStatus::HttpError { code } => {
            let err = NetworkError::HttpStatus {
                status: *code,
                message: outcome.detail.clone().unwrap_or_default(),
            };
            warn!(
                provider = %outcome.provider_name,
                url,
                code = err.error_code(),
                category = err.category().as_str(),
                "Submission rejected: {}",
                err
            );
        }
        OutcomeStatus::ProviderError { message } => {
            warn!(
                provider = %outcome.provider_name,
                url,
                "Provider refused submission: {}",
                message
            );
        }
    }
}
