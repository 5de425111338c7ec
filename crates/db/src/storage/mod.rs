//! Blob storage port and the JSON adapter layered on it.
//!
//! A [`BlobStore`] moves opaque text blobs by key. [`StorageAdapter`] turns
//! those blobs into typed values and never fails outward on load: missing or
//! corrupt data degrades to the caller's default.

pub mod file;
pub mod memory;

use std::future::Future;
use std::sync::LazyLock;

use camlog_core::error::CoreError;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Keyed text storage.
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if there is none.
    fn read(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the blob under `key`.
    fn write(
        &self,
        key: &str,
        contents: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Remove the blob under `key`. Returns whether one existed.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send;
}

static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex"));

/// Keys double as file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if KEY_RE.is_match(key) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// JSON (de)serialization over a [`BlobStore`].
#[derive(Debug, Clone)]
pub struct StorageAdapter<B> {
    blobs: B,
}

impl<B: BlobStore> StorageAdapter<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Load and parse the value under `key`, falling back to `default` when
    /// the blob is absent, unreadable, or does not parse.
    pub async fn load<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned + Send,
    {
        let raw = match self.blobs.read(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to read stored data, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Stored data is corrupt, using default");
                default
            }
        }
    }

    /// Serialize and write `value` under `key`. Returns `false` on failure.
    pub async fn save<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + Sync + ?Sized,
    {
        self.try_save(key, value).await.is_ok()
    }

    /// Like [`save`](Self::save) but hands back the failure.
    pub async fn try_save<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let result = match serde_json::to_string(value) {
            Ok(text) => self.blobs.write(key, &text).await,
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            tracing::error!(key, error = %err, "Failed to save data");
        }
        result
    }

    /// Drop the value under `key`. Returns `false` on failure.
    pub async fn remove(&self, key: &str) -> bool {
        match self.blobs.remove(key).await {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "Failed to remove data");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
