//! Change notification: turns content status transitions into provider
//! submissions.
//!
//! A cycle runs: classify the transition, claim the item, rotate and read the
//! key, resolve and clean the URL, apply exclusions and the visibility gate,
//! then submit to every provider at once. Each step may end the cycle early
//! with an empty outcome list. Nothing here returns an error to the caller.

mod guard;
mod transition;
mod url;

pub use guard::{InProgress, InProgressGuard};
pub use transition::classify_transition;
pub use url::normalize_trashed_url;

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::cancel::CancelSignal;
use crate::error::{ErrorContext, IndexNowError};
use crate::exclusion::ExclusionSet;
use crate::key_manager::{KeyManager, VerificationResponse};
use crate::models::{
    ContentItem, PostStatus, Provider, SubmissionAction, SubmissionOutcome, VerificationKey,
};
use crate::traits::Clock;
use crate::transport::Transport;

/// The notification service. Share it as `Arc<ChangeNotifier>`.
pub struct ChangeNotifier {
    keys: Arc<KeyManager>,
    transport: Transport,
    clock: Arc<dyn Clock>,
    providers: Vec<Provider>,
    exclusions: ExclusionSet,
    in_progress: InProgress,
    site_url: String,
    enabled: bool,
    site_public: bool,
    cancel: CancelSignal,
}

impl ChangeNotifier {
    /// An enabled notifier for a public site with no providers.
    pub fn new(
        keys: Arc<KeyManager>,
        transport: Transport,
        clock: Arc<dyn Clock>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            transport,
            clock,
            providers: Vec::new(),
            exclusions: ExclusionSet::new(),
            in_progress: InProgress::new(),
            site_url: site_url.into(),
            enabled: true,
            site_public: true,
            cancel: CancelSignal::never(),
        }
    }

    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_excluded_paths<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusions = ExclusionSet::from_prefixes(prefixes);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sites hidden from search engines never submit.
    pub fn with_site_public(mut self, site_public: bool) -> Self {
        self.site_public = site_public;
        self
    }

    /// In-flight submissions resolve as transport errors once `cancel` fires.
    pub fn with_cancel_signal(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.site_public
    }

    pub fn key_manager(&self) -> &Arc<KeyManager> {
        &self.keys
    }

    /// Entry point for a status change on `item`.
    ///
    /// Returns one outcome per provider in provider order, or an empty list
    /// if the transition was skipped for any reason.
    pub async fn on_status_transition(
        &self,
        old_status: &PostStatus,
        new_status: &PostStatus,
        item: &ContentItem,
    ) -> Vec<SubmissionOutcome> {
        if !self.is_enabled() {
            debug!(content_id = item.id, "Notifier disabled; ignoring transition");
            return Vec::new();
        }
        if item.is_revision {
            return Vec::new();
        }

        let Some(action) = classify_transition(old_status, new_status) else {
            debug!(
                content_id = item.id,
                "No submission for {} -> {}", old_status, new_status
            );
            return Vec::new();
        };

        let Some(_claim) = self.in_progress.try_enter(item.id) else {
            debug!(content_id = item.id, "Transition already in progress; skipping");
            return Vec::new();
        };

        let key = match self.current_key().await {
            Ok(key) => key,
            Err(err) => {
                self.log_key_failure(err, Some(item.id));
                return Vec::new();
            }
        };

        let Some(resolved) = item.canonical_url() else {
            debug!(content_id = item.id, "No canonical URL; skipping");
            return Vec::new();
        };
        let url = normalize_trashed_url(resolved, action == SubmissionAction::Delete);

        if let Some(prefix) = self.exclusions.matching_prefix(&url) {
            debug!(content_id = item.id, %url, %prefix, "URL is excluded; skipping");
            return Vec::new();
        }

        if action != SubmissionAction::Delete && !item.publicly_viewable {
            debug!(content_id = item.id, %url, "Item is not publicly viewable; skipping");
            return Vec::new();
        }

        let outcomes = self.submit_all(&url, &key).await;
        log_summary(Some(item.id), action, &url, &outcomes);
        outcomes
    }

    /// Submit an arbitrary URL, e.g. from the command line.
    ///
    /// Same key handling and exclusions as a transition, without the
    /// visibility gate.
    pub async fn submit_url(&self, url: &str, action: SubmissionAction) -> Vec<SubmissionOutcome> {
        if !self.is_enabled() {
            debug!(url, "Notifier disabled; not submitting");
            return Vec::new();
        }

        let url = url.trim();
        if url.is_empty() {
            return Vec::new();
        }

        if let Some(prefix) = self.exclusions.matching_prefix(url) {
            debug!(url, %prefix, "URL is excluded; skipping");
            return Vec::new();
        }

        let key = match self.current_key().await {
            Ok(key) => key,
            Err(err) => {
                self.log_key_failure(err, None);
                return Vec::new();
            }
        };

        let outcomes = self.submit_all(url, &key).await;
        log_summary(None, action, url, &outcomes);
        outcomes
    }

    /// Key file response for `request_path`, when the notifier is enabled.
    pub async fn verification(&self, request_path: &str) -> Option<VerificationResponse> {
        if !self.enabled {
            return None;
        }
        self.keys
            .serve_verification(request_path, &self.site_url)
            .await
    }

    /// Returns whether `prefix` was newly added.
    pub fn add_excluded_path(&self, prefix: &str) -> bool {
        self.exclusions.add(prefix)
    }

    /// Returns whether `prefix` was present.
    pub fn remove_excluded_path(&self, prefix: &str) -> bool {
        self.exclusions.remove(prefix)
    }

    pub fn excluded_paths(&self) -> Vec<String> {
        self.exclusions.prefixes()
    }

    async fn current_key(&self) -> Result<VerificationKey, IndexNowError> {
        self.keys.rotate_if_expired(self.clock.now()).await?;
        self.keys.get_active_key().await
    }

    async fn submit_all(&self, url: &str, key: &VerificationKey) -> Vec<SubmissionOutcome> {
        let submissions = self.providers.iter().map(|provider| {
            self.transport
                .submit(provider, &self.site_url, url, key.value(), &self.cancel)
        });
        join_all(submissions).await
    }

    fn log_key_failure(&self, err: IndexNowError, content_id: Option<u64>) {
        let mut ctx = ErrorContext::new("notification_cycle").with_component("notifier");
        if let Some(id) = content_id {
            ctx = ctx.with_content_id(id);
        }
        error!(
            code = err.error_code(),
            category = err.category().as_str(),
            retryable = err.is_retryable(),
            "Notification cycle aborted: {} {}",
            err,
            ctx.to_log_string()
        );
    }
}

fn log_summary(
    content_id: Option<u64>,
    action: SubmissionAction,
    url: &str,
    outcomes: &[SubmissionOutcome],
) {
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    info!(
        content_id,
        %action,
        url,
        succeeded,
        failed = outcomes.len() - succeeded,
        "Notified providers"
    );
}
