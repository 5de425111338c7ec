//! Repository layer.
//!
//! Each repository owns an in-memory collection mirrored to a
//! [`StorageAdapter`](crate::storage::StorageAdapter) blob.

pub mod log_entry_repo;

pub use log_entry_repo::LogEntryRepo;
