//! Folder and note entities.
//!
//! Folders and notes live in one identifier namespace. A folder owns two ordered
//! sequences of child identifiers; a note points back at its owning folder. The
//! entities themselves carry no behavior beyond construction: every mutation that
//! touches more than one entity goes through [`ContentStore`](crate::domain::ContentStore)
//! so the tree invariants are enforced in one place.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a folder or a note.
///
/// Serialized as a plain JSON string so persisted snapshots stay compatible with
/// hand-written or older blobs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for EntityId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A named container node in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: EntityId,
    pub name: String,
    /// `None` only for the root folder.
    pub parent: Option<EntityId>,
    /// Child folders in display order.
    pub folders: Vec<EntityId>,
    /// Child notes in display order.
    pub notes: Vec<EntityId>,
}

impl Folder {
    /// Creates an empty folder under `parent`.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, parent: Option<EntityId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            folders: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Returns `true` for the folder with no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` when the folder lists no children at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.notes.is_empty()
    }
}

/// A named leaf document owned by exactly one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: EntityId,
    pub name: String,
    pub content: String,
    /// Owning folder.
    pub folder: EntityId,
}

impl Note {
    /// Creates a note whose content is the default template for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::domain::{EntityId, Note};
    ///
    /// let note = Note::new(EntityId::from("n1"), "Groceries", EntityId::from("root"));
    /// assert_eq!(note.content, "# Groceries\n\nStart writing your note here...");
    /// ```
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, folder: EntityId) -> Self {
        let name = name.into();
        let content = default_note_content(&name);
        Self {
            id,
            name,
            content,
            folder,
        }
    }
}

/// Template content given to freshly created notes.
#[must_use]
pub fn default_note_content(name: &str) -> String {
    format!("# {name}\n\nStart writing your note here...")
}

/// Kind of entity an identifier resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Folder,
    Note,
}

/// Borrowed view of a resolved identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Folder(&'a Folder),
    Note(&'a Note),
}

impl<'a> Entity<'a> {
    /// Identifier of the resolved entity.
    #[must_use]
    pub fn id(&self) -> &'a EntityId {
        match self {
            Self::Folder(folder) => &folder.id,
            Self::Note(note) => &note.id,
        }
    }

    /// Display name of the resolved entity.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::Note(note) => &note.name,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Folder(_) => EntityKind::Folder,
            Self::Note(_) => EntityKind::Note,
        }
    }
}
