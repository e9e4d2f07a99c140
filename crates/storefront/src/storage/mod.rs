//! Key-value persistence for session state.
//!
//! Modelled on browser local storage: string keys, string values, whole
//! values replaced on every write, and an optional byte quota. The cart is
//! the only writer and keeps one entry under [`crate::cart::CART_STORAGE_KEY`].
//!
//! # Backends
//!
//! - [`FileStore`] - JSON object on disk, replaced atomically on each write
//! - [`MemoryStore`] - process-local map for tests and throwaway sessions

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The write would exceed the configured byte quota.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Size of the store after the rejected write.
        needed: u64,
        /// Configured limit.
        quota: u64,
    },
}

impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A string key-value store.
///
/// Writes are synchronous: when `set` returns `Ok`, the value is durable as
/// far as the backend can make it. A failed write leaves the previous value
/// in place.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails or exceeds the quota.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// A boxed store that can be moved between threads, as held by the server.
pub type DynStore = Box<dyn KeyValueStore + Send + Sync>;

/// Size in bytes a set of entries occupies, counting keys and values.
fn entries_size<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> u64 {
    entries
        .map(|(key, value)| (key.len() + value.len()) as u64)
        .sum()
}

/// Reject a write whose resulting size exceeds `quota`.
fn check_quota(needed: u64, quota: Option<u64>) -> Result<()> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
