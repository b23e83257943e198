//! Storage record models for the persistence layer.
//!
//! These types mirror the JSON blob byte for byte and are kept separate from the
//! domain types so the on-disk format can stay stable while the domain evolves.
//! Keys are camelCase for compatibility with blobs written by earlier versions of
//! the app:
//!
//! ```json
//! {
//!   "currentPath": ["personal"],
//!   "selectedNote": "ideas",
//!   "editorMode": "split",
//!   "sidebarVisible": true,
//!   "folders": {
//!     "root": { "id": "root", "name": "All Notes", "parent": null,
//!               "folders": ["personal"], "notes": [] }
//!   },
//!   "notes": {
//!     "ideas": { "id": "ideas", "name": "Ideas", "content": "# Ideas", "folder": "personal" }
//!   }
//! }
//! ```

use crate::domain::entity::{EntityId, Folder, Note};
use crate::domain::error::{NotecaseError, Result};
use crate::domain::snapshot::{EditorMode, Snapshot};
use crate::domain::store::ContentStore;
use crate::domain::NavigationCursor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A folder as stored in the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: EntityId,
    pub name: String,
    pub parent: Option<EntityId>,
    #[serde(default)]
    pub folders: Vec<EntityId>,
    #[serde(default)]
    pub notes: Vec<EntityId>,
}

/// A note as stored in the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub folder: EntityId,
}

/// The whole persisted blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    #[serde(default)]
    pub current_path: Vec<EntityId>,
    #[serde(default)]
    pub selected_note: Option<EntityId>,
    #[serde(default)]
    pub editor_mode: EditorMode,
    #[serde(default = "default_sidebar_visible")]
    pub sidebar_visible: bool,
    pub folders: BTreeMap<EntityId, FolderRecord>,
    pub notes: BTreeMap<EntityId, NoteRecord>,
}

const fn default_sidebar_visible() -> bool {
    true
}

impl From<&Folder> for FolderRecord {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.clone(),
            name: folder.name.clone(),
            parent: folder.parent.clone(),
            folders: folder.folders.clone(),
            notes: folder.notes.clone(),
        }
    }
}

impl From<FolderRecord> for Folder {
    fn from(record: FolderRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            parent: record.parent,
            folders: record.folders,
            notes: record.notes,
        }
    }
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            name: note.name.clone(),
            content: note.content.clone(),
            folder: note.folder.clone(),
        }
    }
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            content: record.content,
            folder: record.folder,
        }
    }
}

impl From<&Snapshot> for SnapshotRecord {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            current_path: snapshot.cursor.path().to_vec(),
            selected_note: snapshot.selected_note.clone(),
            editor_mode: snapshot.editor_mode,
            sidebar_visible: snapshot.sidebar_visible,
            folders: snapshot
                .store
                .folders()
                .map(|folder| (folder.id.clone(), FolderRecord::from(folder)))
                .collect(),
            notes: snapshot
                .store
                .notes()
                .map(|note| (note.id.clone(), NoteRecord::from(note)))
                .collect(),
        }
    }
}

impl TryFrom<SnapshotRecord> for Snapshot {
    type Error = NotecaseError;

    /// Rebuilds and validates the tree, then repairs stale view state.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::CorruptSnapshot`] if a map key disagrees with the
    /// record it holds or the records do not form a valid tree.
    fn try_from(record: SnapshotRecord) -> Result<Self> {
        check_keys(&record.folders, |folder| &folder.id)?;
        check_keys(&record.notes, |note| &note.id)?;

        let store = ContentStore::from_parts(
            record.folders.into_values().map(Folder::from),
            record.notes.into_values().map(Note::from),
        )?;

        let mut snapshot = Self {
            store,
            cursor: NavigationCursor::from_path(record.current_path),
            selected_note: record.selected_note,
            editor_mode: record.editor_mode,
            sidebar_visible: record.sidebar_visible,
        };
        if snapshot.normalize() {
            tracing::debug!("repaired stale view state in stored snapshot");
        }
        Ok(snapshot)
    }
}

fn check_keys<T>(map: &BTreeMap<EntityId, T>, id_of: impl Fn(&T) -> &EntityId) -> Result<()> {
    match map.iter().find(|(key, value)| *key != id_of(*value)) {
        Some((key, value)) => Err(NotecaseError::CorruptSnapshot(format!(
            "entry {key} holds record {}",
            id_of(value)
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_blob_shape() {
        let json = r#"{
            "currentPath": ["work"],
            "selectedNote": "tasks",
            "editorMode": "split",
            "sidebarVisible": false,
            "folders": {
                "root": {"id": "root", "name": "All Notes", "parent": null, "folders": ["work"], "notes": []},
                "work": {"id": "work", "name": "Work", "parent": "root", "folders": [], "notes": ["tasks"]}
            },
            "notes": {
                "tasks": {"id": "tasks", "name": "Tasks", "content": "- [ ] x", "folder": "work"}
            }
        }"#;

        let record: SnapshotRecord = serde_json::from_str(json).unwrap();
        let snapshot = Snapshot::try_from(record).unwrap();

        assert_eq!(snapshot.cursor.path(), &[EntityId::from("work")]);
        assert_eq!(snapshot.selected_note, Some(EntityId::from("tasks")));
        assert_eq!(snapshot.editor_mode, EditorMode::Split);
        assert!(!snapshot.sidebar_visible);
        assert_eq!(snapshot.store.note_count(), 1);
    }

    #[test]
    fn view_fields_default_when_absent() {
        let json = r#"{
            "folders": {"root": {"id": "root", "name": "All Notes", "parent": null}},
            "notes": {}
        }"#;
        let record: SnapshotRecord = serde_json::from_str(json).unwrap();
        assert!(record.current_path.is_empty());
        assert_eq!(record.editor_mode, EditorMode::Edit);
        assert!(record.sidebar_visible);
        assert!(Snapshot::try_from(record).is_ok());
    }

    #[test]
    fn mismatched_key_is_corrupt() {
        let json = r#"{
            "folders": {"root": {"id": "elsewhere", "name": "All Notes", "parent": null}},
            "notes": {}
        }"#;
        let record: SnapshotRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Snapshot::try_from(record),
            Err(NotecaseError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn serializes_camel_case_keys() {
        let record = SnapshotRecord::from(&Snapshot::default());
        let value = serde_json::to_value(&record).unwrap();
        for key in ["currentPath", "selectedNote", "editorMode", "sidebarVisible", "folders", "notes"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["editorMode"], "edit");
        assert_eq!(value["folders"]["root"]["parent"], serde_json::Value::Null);
    }
}
