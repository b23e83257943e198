//! In-memory storage backend.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Volatile [`KeyValueStore`] backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.entries.get(key).cloned();
        tracing::trace!(key = %key, found = value.is_some(), "memory get");
        Ok(value)
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        tracing::trace!(key = %key, len = bytes.len(), "memory set");
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"two"[..]));
    }
}
