//! Snapshot persistence over a [`KeyValueStore`].
//!
//! The gateway stores the whole application state as one JSON blob under a
//! single key. Loading is forgiving: a missing, unreadable or invalid blob
//! yields the built-in example tree so the app always starts.

use crate::domain::error::{NotecaseError, Result};
use crate::domain::snapshot::Snapshot;
use crate::storage::backend::KeyValueStore;
use crate::storage::models::SnapshotRecord;

/// Key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notesApp";

/// Loads and saves [`Snapshot`]s under one key of a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use notecase::storage::{MemoryStore, SnapshotGateway};
///
/// let mut gateway = SnapshotGateway::new(MemoryStore::new(), "notesApp");
/// let mut snapshot = gateway.load();
/// snapshot.sidebar_visible = false;
/// gateway.save(&snapshot)?;
///
/// assert_eq!(gateway.load(), snapshot);
/// # Ok::<(), notecase::NotecaseError>(())
/// ```
#[derive(Debug)]
pub struct SnapshotGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotGateway<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads the stored snapshot, falling back to the default tree.
    ///
    /// Never fails: read errors and corrupt blobs are logged and replaced with
    /// [`Snapshot::default`].
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!(key = %self.key, "no stored snapshot, using default content");
                Snapshot::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding stored snapshot, using default content");
                Snapshot::default()
            }
        }
    }

    /// Loads the stored snapshot without any fallback.
    ///
    /// Returns `Ok(None)` when nothing is stored (a JSON `null` counts as
    /// nothing).
    ///
    /// # Errors
    ///
    /// - [`NotecaseError::CorruptSnapshot`] if the blob does not parse or does not describe a valid tree
    /// - any error the underlying store reports
    pub fn try_load(&self) -> Result<Option<Snapshot>> {
        let _span = tracing::debug_span!("snapshot_load", key = %self.key).entered();

        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        let record: Option<SnapshotRecord> = serde_json::from_slice(&bytes)
            .map_err(|e| NotecaseError::CorruptSnapshot(format!("failed to parse JSON: {e}")))?;
        let Some(record) = record else {
            return Ok(None);
        };

        let snapshot = Snapshot::try_from(record)?;
        tracing::debug!(
            folders = snapshot.store.folder_count(),
            notes = snapshot.store.note_count(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    /// Writes the full snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let _span = tracing::debug_span!("snapshot_save", key = %self.key).entered();

        let record = SnapshotRecord::from(snapshot);
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| NotecaseError::Storage(format!("failed to serialize JSON: {e}")))?;
        self.store.set(&self.key, &json)?;

        tracing::debug!(bytes = json.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn gateway_with(bytes: &[u8]) -> SnapshotGateway<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, bytes).unwrap();
        SnapshotGateway::new(store, DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn empty_store_loads_default() {
        let gateway = SnapshotGateway::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);
        assert!(gateway.try_load().unwrap().is_none());
        assert_eq!(gateway.load(), Snapshot::default());
    }

    #[test]
    fn null_blob_counts_as_missing() {
        let gateway = gateway_with(b"null");
        assert!(gateway.try_load().unwrap().is_none());
    }

    #[test]
    fn garbage_is_corrupt_but_load_recovers() {
        let gateway = gateway_with(b"{not json");
        assert!(matches!(
            gateway.try_load(),
            Err(NotecaseError::CorruptSnapshot(_))
        ));
        assert_eq!(gateway.load(), Snapshot::default());
    }

    #[test]
    fn structurally_invalid_tree_loads_default() {
        let json = br#"{
            "folders": {
                "root": {"id": "root", "name": "All Notes", "parent": null, "folders": ["a"], "notes": []},
                "a": {"id": "a", "name": "A", "parent": "b", "folders": [], "notes": []}
            },
            "notes": {}
        }"#;
        let gateway = gateway_with(json);
        assert!(gateway.try_load().is_err());
        assert_eq!(gateway.load().store, crate::domain::ContentStore::seeded());
    }
}
