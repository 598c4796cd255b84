//! Verification key lifecycle: generation, lazy rotation and disclosure.
//!
//! The active key is cached in-process behind an `RwLock`, so readers see
//! either the previous key or its replacement, never a mix. Rotation and
//! first-use generation are serialized by a separate mutex so two cycles
//! racing on an expired key persist only one replacement.

use chrono::{DateTime, Duration, Utc};
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{ErrorContext, IndexNowResult, ResultExt, StorageError};
use crate::models::VerificationKey;
use crate::traits::{Clock, KeyStore};

/// Default interval after which the key is replaced.
pub const DEFAULT_ROTATION_DAYS: i64 = 7;

/// Content type of the disclosed key.
pub const VERIFICATION_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// `X-Robots-Tag` value sent with the disclosed key.
pub const VERIFICATION_ROBOTS_TAG: &str = "noindex";

/// Body and headers for a request that hit the key file URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResponse {
    pub body: String,
    pub content_type: &'static str,
    pub robots_tag: &'static str,
}

/// Owns the verification key.
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    clock: Arc<dyn Clock>,
    rotation_period: Duration,
    active: RwLock<Option<VerificationKey>>,
    rotation: Mutex<()>,
}

impl KeyManager {
    pub fn new(store: Arc<dyn KeyStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            rotation_period: Duration::days(DEFAULT_ROTATION_DAYS),
            active: RwLock::new(None),
            rotation: Mutex::new(()),
        }
    }

    pub fn with_rotation_period(mut self, period: Duration) -> Self {
        self.rotation_period = period;
        self
    }

    pub fn rotation_period(&self) -> Duration {
        self.rotation_period
    }

    /// The current key, generating and persisting one if none is stored.
    ///
    /// Stable across calls until the key is rotated.
    pub async fn get_active_key(&self) -> IndexNowResult<VerificationKey> {
        if let Some(key) = self.active.read().await.clone() {
            return Ok(key);
        }

        let _guard = self.rotation.lock().await;
        if let Some(key) = self.active.read().await.clone() {
            return Ok(key);
        }

        let key = match self.load_stored("get_active_key").await? {
            Some(key) => key,
            None => {
                let key = self.generate_key();
                self.persist(&key, "get_active_key").await?;
                info!("Generated verification key");
                key
            }
        };

        *self.active.write().await = Some(key.clone());
        Ok(key)
    }

    /// Replace the key if it is at least one rotation period old at `now`.
    ///
    /// Returns whether a new key was installed. With no key stored yet there
    /// is nothing to rotate and this returns `false`.
    pub async fn rotate_if_expired(&self, now: DateTime<Utc>) -> IndexNowResult<bool> {
        let _guard = self.rotation.lock().await;

        let cached = self.active.read().await.clone();
        let current = match cached {
            Some(key) if !key.is_expired(now, self.rotation_period) => return Ok(false),
            // Another process may have rotated already; prefer its key.
            _ => self.load_stored("rotate_if_expired").await?,
        };

        let Some(current) = current else {
            return Ok(false);
        };

        if !current.is_expired(now, self.rotation_period) {
            debug!("Adopting verification key rotated elsewhere");
            *self.active.write().await = Some(current);
            return Ok(false);
        }

        let replacement = VerificationKey::generate(now);
        self.persist(&replacement, "rotate_if_expired").await?;
        *self.active.write().await = Some(replacement);

        info!(
            age_days = (now - current.created_at()).num_days(),
            "Rotated verification key"
        );
        Ok(true)
    }

    /// A fresh key stamped with the current time. Not persisted.
    pub fn generate_key(&self) -> VerificationKey {
        VerificationKey::generate(self.clock.now())
    }

    /// Answer a request for `{home_url}/{key}.txt`.
    ///
    /// `request_path` may be a bare path (`/abc.txt`) or an absolute URL.
    /// Returns `None` for anything else, including when no key exists yet or
    /// the store can't be read; the caller falls through to normal routing.
    pub async fn serve_verification(
        &self,
        request_path: &str,
        home_url: &str,
    ) -> Option<VerificationResponse> {
        let key = match self.current_key().await {
            Ok(Some(key)) => key,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cannot serve verification key: {}", e);
                return None;
            }
        };

        let (home_host, home_path) = split_url(home_url);
        let (request_host, request_path) = split_url(request_path);
        if let (Some(home), Some(request)) = (home_host, request_host) {
            if !home.eq_ignore_ascii_case(&request) {
                return None;
            }
        }

        let expected = format!("{}/{}", home_path.trim_end_matches('/'), key.file_name());
        (request_path == expected).then(|| VerificationResponse {
            body: key.value().to_string(),
            content_type: VERIFICATION_CONTENT_TYPE,
            robots_tag: VERIFICATION_ROBOTS_TAG,
        })
    }

    /// Cached or stored key, without generating one.
    async fn current_key(&self) -> IndexNowResult<Option<VerificationKey>> {
        if let Some(key) = self.active.read().await.clone() {
            return Ok(Some(key));
        }
        self.load_stored("serve_verification").await
    }

    /// Load from the store, dropping keys that fail validation.
    async fn load_stored(&self, operation: &str) -> IndexNowResult<Option<VerificationKey>> {
        let stored = match self.store.load().await {
            Err(StorageError::Corrupt(message)) => {
                warn!("Stored verification key is unreadable ({}); replacing it", message);
                None
            }
            other => other
                .with_context(|| ErrorContext::new(operation).with_component("key_store"))?,
        };

        Ok(stored.and_then(|key| {
            if key.is_well_formed() {
                Some(key)
            } else {
                warn!("Stored verification key is malformed; replacing it");
                None
            }
        }))
    }

    async fn persist(&self, key: &VerificationKey, operation: &str) -> IndexNowResult<()> {
        self.store
            .save(key)
            .await
            .with_context(|| ErrorContext::new(operation).with_component("key_store"))
    }
}

/// Split a path or absolute URL into `(host, path)`.
fn split_url(input: &str) -> (Option<String>, String) {
    match Url::parse(input) {
        Ok(url) if url.has_host() => (url.host_str().map(str::to_string), url.path().to_string()),
        _ => {
            let path = input.split(['?', '#']).next().unwrap_or_default();
            (None, path.to_string())
        }
    }
}
