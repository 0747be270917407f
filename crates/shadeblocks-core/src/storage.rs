//! Key-value snapshot persistence.
//!
//! # Design
//! - Stores hold opaque text; callers own the encoding.
//! - Implementations report failures; widgets decide whether to absorb them.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageResult;

/// Durable string store keyed by widget identity.
pub trait SnapshotStore {
    /// Read the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    /// Returns an error when the backing store cannot be read.
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the backing store rejects the write.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns an error when the backing store cannot be modified.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Process-local store, useful for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing the trait.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Seed a raw value under `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_removes() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.load("k")?, None);
        store.save("k", "v")?;
        assert_eq!(store.load("k")?.as_deref(), Some("v"));
        store.remove("k")?;
        store.remove("k")?;
        assert_eq!(store.get("k"), None);
        Ok(())
    }
}
