//! URL-path prefixes that must never be submitted.

use std::sync::RwLock;

use reqwest::Url;

/// Ordered, duplicate-free set of path prefixes.
///
/// Shared by every notification cycle; the lock is held only for the
/// duration of a lookup or edit.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    prefixes: RwLock<Vec<String>>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from configuration. Duplicates and blanks are dropped.
    pub fn from_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = Self::new();
        for prefix in prefixes {
            set.add(prefix.as_ref());
        }
        set
    }

    /// Returns whether `prefix` was newly added.
    pub fn add(&self, prefix: &str) -> bool {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return false;
        }

        let mut prefixes = self.prefixes.write().unwrap_or_else(|e| e.into_inner());
        if prefixes.iter().any(|p| p == prefix) {
            return false;
        }
        prefixes.push(prefix.to_string());
        true
    }

    /// Returns whether `prefix` was present.
    pub fn remove(&self, prefix: &str) -> bool {
        let prefix = prefix.trim();
        let mut prefixes = self.prefixes.write().unwrap_or_else(|e| e.into_inner());
        let before = prefixes.len();
        prefixes.retain(|p| p != prefix);
        prefixes.len() != before
    }

    /// Snapshot in insertion order.
    pub fn prefixes(&self) -> Vec<String> {
        self.prefixes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The first prefix the path of `url` starts with, if any.
    ///
    /// `url` may be absolute or a bare path.
    pub fn matching_prefix(&self, url: &str) -> Option<String> {
        let path = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => url.to_string(),
        };

        self.prefixes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|prefix| path.starts_with(prefix.as_str()))
            .cloned()
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.matching_prefix(url).is_some()
    }
}
