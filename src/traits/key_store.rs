//! Key storage trait abstraction.
//!
//! The verification key outlives the process, so it is persisted through a
//! store supplied by the host. The only consistency requirement is
//! read-after-write within one process: a `load` after a successful `save`
//! returns the saved key, never a partially written one.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::VerificationKey;

/// Trait for verification key persistence.
///
/// # Example
///
/// ```ignore
/// use indexnow::traits::KeyStore;
///
/// async fn current<S: KeyStore>(store: &S) -> Option<String> {
///     store.load().await.ok().flatten().map(|k| k.value().to_string())
/// }
/// ```
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Load the stored key.
    ///
    /// # Returns
    /// - `Ok(Some(key))` if a key is stored
    /// - `Ok(None)` if nothing is stored yet
    /// - `Err(error)` if the store could not be read
    async fn load(&self) -> Result<Option<VerificationKey>, StorageError>;

    /// Replace the stored key.
    ///
    /// Implementations must make the replacement atomic for readers.
    async fn save(&self, key: &VerificationKey) -> Result<(), StorageError>;
}
