//! Local persistence for camera log entries.
//!
//! [`storage`] holds the blob port and its adapters; [`repositories`] holds
//! the record store built on top of it.

pub mod repositories;
pub mod storage;

/// Blob key under which the entry collection is persisted.
pub const LOGS_KEY: &str = "camera-logs";

pub use repositories::LogEntryRepo;
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, StorageAdapter, StorageError};
