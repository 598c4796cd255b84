//! In-memory key store for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::models::VerificationKey;
use crate::traits::KeyStore;

/// In-memory [`KeyStore`] with failure injection.
///
/// Clones share state, so a test can keep a handle while the key manager
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyStore {
    key: Arc<Mutex<Option<VerificationKey>>>,
    load_should_fail: Arc<Mutex<bool>>,
    save_should_fail: Arc<Mutex<bool>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `key`.
    pub fn with_key(key: VerificationKey) -> Self {
        let store = Self::default();
        store.set_key(Some(key));
        store
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Current stored key, bypassing failure injection.
    pub fn get_key(&self) -> Option<VerificationKey> {
        self.key.lock().unwrap().clone()
    }

    /// Replace the stored key, bypassing failure injection.
    pub fn set_key(&self, key: Option<VerificationKey>) {
        *self.key.lock().unwrap() = key;
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn load(&self) -> Result<Option<VerificationKey>, StorageError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StorageError::ReadFailed {
                path: None,
                message: "Mock load failure".to_string(),
            });
        }
        Ok(self.get_key())
    }

    async fn save(&self, key: &VerificationKey) -> Result<(), StorageError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StorageError::WriteFailed {
                path: None,
                message: "Mock save failure".to_string(),
            });
        }
        self.set_key(Some(key.clone()));
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_initially_empty() {
        let store = InMemoryKeyStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let store = InMemoryKeyStore::new();
        let key = VerificationKey::generate(Utc::now());
        store.save(&key).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(key));
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryKeyStore::with_key(VerificationKey::generate(Utc::now()));
        store.set_load_should_fail(true);
        store.set_save_should_fail(true);

        assert!(store.load().await.is_err());
        assert!(store
            .save(&VerificationKey::generate(Utc::now()))
            .await
            .is_err());
        assert_eq!(store.save_count(), 0);
    }
}
