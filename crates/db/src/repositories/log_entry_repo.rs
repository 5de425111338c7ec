//! Record store for camera log entries.

use camlog_core::draft::LogDraft;
use camlog_core::error::CoreError;
use camlog_core::form_session::EntryStore;
use camlog_core::log_entry::{generate_id, now, LogEntry};
use camlog_core::types::Timestamp;

use crate::storage::{BlobStore, StorageAdapter};
use crate::LOGS_KEY;

/// Insertion-ordered collection of log entries, persisted in full after
/// every mutation.
///
/// Mutations build the next collection on the side and only replace the
/// in-memory one once the write succeeded, so a failed save changes nothing.
#[derive(Debug)]
pub struct LogEntryRepo<B> {
    storage: StorageAdapter<B>,
    entries: Vec<LogEntry>,
}

impl<B: BlobStore> LogEntryRepo<B> {
    /// Load the persisted collection. Missing or corrupt data opens empty.
    pub async fn open(blobs: B) -> Self {
        let storage = StorageAdapter::new(blobs);
        let entries: Vec<LogEntry> = storage.load(LOGS_KEY, Vec::new()).await;
        tracing::debug!(count = entries.len(), "Loaded camera logs");
        Self { storage, entries }
    }

    pub fn storage(&self) -> &StorageAdapter<B> {
        &self.storage
    }

    /// All entries, oldest first.
    pub fn list(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn find_by_id(&self, id: &str) -> Option<&LogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create an entry from `draft` with a fresh id and the current time.
    pub async fn create(&mut self, draft: &LogDraft) -> Result<LogEntry, CoreError> {
        self.create_at(draft, now()).await
    }

    pub async fn create_at(
        &mut self,
        draft: &LogDraft,
        at: Timestamp,
    ) -> Result<LogEntry, CoreError> {
        let entry = LogEntry::from_draft(generate_id(), draft, at)?;

        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit(next).await?;

        tracing::info!(id = %entry.id, camera = %entry.camera, "Created camera log");
        Ok(entry)
    }

    /// Replace entry `id` with `draft`, keeping its id and creation time.
    /// Returns `Ok(None)` when no such entry exists.
    pub async fn update(
        &mut self,
        id: &str,
        draft: &LogDraft,
    ) -> Result<Option<LogEntry>, CoreError> {
        self.update_at(id, draft, now()).await
    }

    pub async fn update_at(
        &mut self,
        id: &str,
        draft: &LogDraft,
        at: Timestamp,
    ) -> Result<Option<LogEntry>, CoreError> {
        let Some(pos) = self.position(id) else {
            tracing::warn!(id, "Update of unknown camera log ignored");
            return Ok(None);
        };

        let updated = self.entries[pos].with_draft(draft, at)?;
        let mut next = self.entries.clone();
        next[pos] = updated.clone();
        self.commit(next).await?;

        tracing::info!(id, "Updated camera log");
        Ok(Some(updated))
    }

    /// Remove entry `id`. Returns `Ok(false)` if it was not there.
    pub async fn delete(&mut self, id: &str) -> Result<bool, CoreError> {
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };

        let mut next = self.entries.clone();
        next.remove(pos);
        self.commit(next).await?;

        tracing::info!(id, "Deleted camera log");
        Ok(true)
    }

    /// Remove every entry. Returns how many were removed.
    pub async fn clear_all(&mut self) -> Result<usize, CoreError> {
        let removed = self.entries.len();
        self.commit(Vec::new()).await?;
        tracing::info!(removed, "Cleared camera logs");
        Ok(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    async fn commit(&mut self, next: Vec<LogEntry>) -> Result<(), CoreError> {
        self.storage.try_save(LOGS_KEY, &next).await?;
        self.entries = next;
        Ok(())
    }
}

impl<B: BlobStore> EntryStore for LogEntryRepo<B> {
    async fn create(&mut self, draft: &LogDraft) -> Result<LogEntry, CoreError> {
        LogEntryRepo::create(self, draft).await
    }

    async fn update(&mut self, id: &str, draft: &LogDraft) -> Result<Option<LogEntry>, CoreError> {
        LogEntryRepo::update(self, id, draft).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
