//! File-backed key-value store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{KeyValueStore, Result, check_quota, entries_size};

/// Key-value store persisted as a single JSON object on disk.
///
/// The whole file is read once when the store is opened. Each write
/// serializes every entry to a temporary file in the same directory and
/// renames it over the original, so readers never observe a half-written
/// file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota: Option<u64>,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file opens as an empty store. A file that exists but does
    /// not hold a JSON object of strings is logged and treated as empty; it
    /// is overwritten by the next successful write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>, quota: Option<u64>) -> Result<Self> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring unreadable storage file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Storage opened");

        Ok(Self {
            path,
            quota,
            entries,
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, replacing the current file.
    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        check_quota(entries_size(entries.iter()), self.quota)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut file, entries)?;
        file.flush()?;
        file.persist(&self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.write(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.write(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json"), None).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path, None).unwrap();
        store.set("cart", "[]").unwrap();

        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path, None).unwrap();
        store.set("cart", "[]").unwrap();
        store.set("theme", "dark").unwrap();
        store.remove("cart").unwrap();
        store.remove("never-set").unwrap();

        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(reopened.get("cart").unwrap(), None);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path, None).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_quota_rejects_write_and_keeps_old_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path, Some(16)).unwrap();
        store.set("cart", "[1]").unwrap();

        let err = store.set("cart", "[1,2,3,4,5,6,7,8,9]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));

        let reopened = FileStore::open(&path, None).unwrap();
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("[1]"));
    }
}
