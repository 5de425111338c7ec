//! Directory-backed blob store: one `<key>.json` file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{validate_key, BlobStore, StorageError};

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Store blobs under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the blob for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json.tmp"))
    }
}

impl BlobStore for FileBlobStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes land in a temporary sibling first and are renamed over the
    /// target, so readers only ever see a complete blob.
    async fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp = self.temp_path_for(key);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&temp, contents).await?;
        if let Err(err) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(err.into());
        }

        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote blob");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn writes_json_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested"));

        assert_eq!(store.read("camera-logs").await.unwrap(), None);
        store.write("camera-logs", "[]").await.unwrap();

        let path = dir.path().join("nested").join("camera-logs.json");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(store.read("camera-logs").await.unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("nested").join(".camera-logs.json.tmp").exists());
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());
        store.write("k", "1").await.unwrap();
        assert!(store.remove("k").await.unwrap());
        assert!(!store.remove("k").await.unwrap());
    }

    #[tokio::test]
    async fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());
        assert_matches!(
            store.write("../escape", "x").await,
            Err(StorageError::InvalidKey(_))
        );
    }
}
