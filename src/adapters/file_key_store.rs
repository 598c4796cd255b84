//! JSON file key store adapter.
//!
//! Keeps the verification key in a small JSON document, by default
//! `~/.indexnow/key.json`. Writes go to a sibling temp file that is renamed
//! over the target, so a concurrent reader sees the old key or the new key.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::models::VerificationKey;
use crate::traits::KeyStore;

/// Directory under the home directory holding notifier state.
const STATE_DIR: &str = ".indexnow";

/// Key file name.
const KEY_FILE: &str = "key.json";

/// File-backed [`KeyStore`].
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Store the key at `path`. Parent directories are created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location, `~/.indexnow/key.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::home_dir()?.join(STATE_DIR).join(KEY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| KEY_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_failed(&self, err: std::io::Error) -> StorageError {
        StorageError::WriteFailed {
            path: Some(self.path.clone()),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn load(&self) -> Result<Option<VerificationKey>, StorageError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    path: Some(self.path.clone()),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    async fn save(&self, key: &VerificationKey) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_failed(e))?;
            }
        }

        let json = serde_json::to_vec_pretty(key)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| self.write_failed(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.write_failed(e))?;

        tracing::debug!("Saved verification key to {}", self.path.display());
        Ok(())
    }
}
