use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest key providers accept.
pub const MIN_KEY_LEN: usize = 8;
/// Longest key providers accept.
pub const MAX_KEY_LEN: usize = 128;

/// The shared secret that proves ownership of the site to providers.
///
/// The value is served back verbatim at `{site}/{value}.txt`, so it must be
/// usable as a URL path segment: ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    value: String,
    created_at: DateTime<Utc>,
}

impl VerificationKey {
    /// Generate a fresh key from a v4 UUID with the hyphens stripped.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            value: Uuid::new_v4().simple().to_string(),
            created_at: now,
        }
    }

    /// Build a key from a stored value, rejecting values that can't be
    /// served as a path segment.
    pub fn parse(value: impl Into<String>, created_at: DateTime<Utc>) -> Option<Self> {
        let key = Self {
            value: value.into(),
            created_at,
        };
        key.is_well_formed().then_some(key)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the key has reached `rotation_period` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, rotation_period: Duration) -> bool {
        now - self.created_at >= rotation_period
    }

    /// Checks length and the alphanumeric invariant. Deserialized keys skip
    /// [`VerificationKey::parse`], so callers loading from storage check this.
    pub fn is_well_formed(&self) -> bool {
        (MIN_KEY_LEN..=MAX_KEY_LEN).contains(&self.value.len())
            && self.value.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// File name the key is disclosed under, e.g. `0f3c...a9.txt`.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.value)
    }
}
