//! Key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over where
//! snapshot bytes live. The trait is deliberately minimal: the application stores
//! one opaque blob per key and never needs more than get and set.

use crate::domain::error::Result;

/// Abstraction over persistent byte storage keyed by string.
///
/// # Implementations
///
/// - [`MemoryStore`](crate::storage::MemoryStore): `HashMap`-backed, for tests and embedding
/// - [`FileStore`](crate::storage::FileStore): one JSON file per key with atomic writes
///
/// # Examples
///
/// ```
/// use notecase::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("notesApp", b"{}")?;
/// assert_eq!(store.get("notesApp")?, Some(b"{}".to_vec()));
/// assert_eq!(store.get("other")?, None);
/// # Ok::<(), notecase::NotecaseError>(())
/// ```
pub trait KeyValueStore {
    /// Returns the bytes stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Backends must not leave a partially
    /// written value behind.
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).set(key, bytes)
    }
}
