//! In-process blob store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{validate_key, BlobStore, StorageError};

#[derive(Debug, Default)]
struct Inner {
    blobs: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

/// Blob store backed by a shared map.
///
/// Clones share the same map, so a handle kept aside sees everything written
/// through another clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    inner: Arc<Inner>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write (and remove) fail with
    /// [`StorageError::Unavailable`] until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Store a blob directly, bypassing the write switch.
    pub fn insert_raw(&self, key: &str, contents: &str) {
        if let Ok(mut blobs) = self.lock() {
            blobs.insert(key.to_string(), contents.to_string());
        }
    }

    /// Current blob under `key`, bypassing the port.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().ok().and_then(|blobs| blobs.get(key).cloned())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.inner
            .blobs
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("writes disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl BlobStore for MemoryBlobStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.check_writable()?;
        self.lock()?.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        self.check_writable()?;
        Ok(self.lock()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn clones_share_contents() {
        let store = MemoryBlobStore::new();
        let handle = store.clone();
        store.write("k", "v").await.unwrap();
        assert_eq!(handle.read("k").await.unwrap().as_deref(), Some("v"));
        assert!(handle.remove("k").await.unwrap());
        assert!(!handle.remove("k").await.unwrap());
        assert_eq!(store.read("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_writes_leave_contents() {
        let store = MemoryBlobStore::new();
        store.write("k", "old").await.unwrap();
        store.fail_writes(true);
        assert_matches!(store.write("k", "new").await, Err(StorageError::Unavailable(_)));
        assert_eq!(store.get_raw("k").as_deref(), Some("old"));
        store.fail_writes(false);
        store.write("k", "new").await.unwrap();
        assert_eq!(store.get_raw("k").as_deref(), Some("new"));
    }
}
