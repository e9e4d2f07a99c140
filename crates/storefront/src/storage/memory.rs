//! In-memory key-value store.

use std::collections::HashMap;

use super::{KeyValueStore, Result, check_quota, entries_size};

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    quota: Option<u64>,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that rejects writes growing it past `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: u64) -> Self {
        Self {
            quota: Some(quota),
            entries: HashMap::new(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let others = self.entries.iter().filter(|(k, _)| k.as_str() != key);
        let needed = entries_size(others) + (key.len() + value.len()) as u64;
        check_quota(needed, self.quota)?;

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let mut store = MemoryStore::with_quota(8);
        store.set("cart", "1234").unwrap();
        // Replacing the value must not count the old one.
        store.set("cart", "abcd").unwrap();
        assert!(store.set("cart", "abcde").is_err());
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("abcd"));
    }
}
