//! The hierarchical content store.
//!
//! [`ContentStore`] exclusively owns every folder and note. All mutations go
//! through it and leave the tree in a state that satisfies the invariants checked
//! by [`ContentStore::validate`]:
//!
//! 1. exactly one folder (the root) has no parent, every other parent resolves;
//! 2. child lists and back pointers agree in both directions;
//! 3. no entity is listed twice and no folder is its own ancestor;
//! 4. identifiers are never reused during the store's lifetime.
//!
//! Write paths are strict and return [`NotecaseError`] for identifiers that do
//! not resolve. Read paths ([`ContentStore::children`], [`ContentStore::ancestors`])
//! skip dangling identifiers instead of failing.

use crate::domain::entity::{Entity, EntityId, Folder, Note};
use crate::domain::error::{NotecaseError, Result};
use crate::domain::ids::IdGenerator;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Identifier of the root folder in a freshly created store.
pub const ROOT_ID: &str = "root";

/// Display name of the root folder in a freshly created store.
pub const ROOT_NAME: &str = "All Notes";

/// A tree invariant that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no root folder")]
    NoRoot,

    #[error("more than one root folder: {first} and {second}")]
    MultipleRoots { first: EntityId, second: EntityId },

    #[error("folder {folder} points at missing parent {parent}")]
    DanglingParent { folder: EntityId, parent: EntityId },

    #[error("folder {parent} lists missing child {child}")]
    DanglingChild { parent: EntityId, child: EntityId },

    #[error("folder {parent} lists {child}, which points back at another folder")]
    ParentMismatch { parent: EntityId, child: EntityId },

    #[error("{child} is listed more than once")]
    AliasedChild { child: EntityId },

    #[error("{id} is not listed by its parent")]
    Orphan { id: EntityId },

    #[error("folder {folder} is not reachable from the root")]
    Cycle { folder: EntityId },

    #[error("{id} is used by both a folder and a note")]
    SharedIdentifier { id: EntityId },
}

/// Resolved, ordered children of one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children<'a> {
    pub folders: Vec<&'a Folder>,
    pub notes: Vec<&'a Note>,
}

impl Children<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.notes.is_empty()
    }
}

/// Owner of the folder/note tree.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: EntityId,
    folders: HashMap<EntityId, Folder>,
    notes: HashMap<EntityId, Note>,
    ids: IdGenerator,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Two stores are equal when they hold the same tree; allocation history is ignored.
impl PartialEq for ContentStore {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.folders == other.folders && self.notes == other.notes
    }
}

impl Eq for ContentStore {}

impl ContentStore {
    /// Creates a store holding only an empty root folder.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::domain::ContentStore;
    ///
    /// let store = ContentStore::new();
    /// assert_eq!(store.root_id().as_str(), "root");
    /// assert_eq!(store.folder_count(), 1);
    /// assert!(store.validate().is_ok());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let root = EntityId::from(ROOT_ID);
        let mut folders = HashMap::new();
        folders.insert(root.clone(), Folder::new(root.clone(), ROOT_NAME, None));

        let mut ids = IdGenerator::new();
        ids.retire(&root);

        Self {
            root,
            folders,
            notes: HashMap::new(),
            ids,
        }
    }

    /// Builds a store from already-linked entities, typically read from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::CorruptSnapshot`] if the entities do not form a
    /// valid tree.
    pub fn from_parts(
        folders: impl IntoIterator<Item = Folder>,
        notes: impl IntoIterator<Item = Note>,
    ) -> Result<Self> {
        let folders: HashMap<EntityId, Folder> = folders
            .into_iter()
            .map(|folder| (folder.id.clone(), folder))
            .collect();
        let notes: HashMap<EntityId, Note> =
            notes.into_iter().map(|note| (note.id.clone(), note)).collect();

        let root = folders
            .values()
            .find(|folder| folder.is_root())
            .map(|folder| folder.id.clone())
            .ok_or_else(|| NotecaseError::CorruptSnapshot(InvariantViolation::NoRoot.to_string()))?;

        let mut ids = IdGenerator::new();
        for id in folders.keys().chain(notes.keys()) {
            ids.retire(id);
        }

        let store = Self {
            root,
            folders,
            notes,
            ids,
        };

        store
            .validate()
            .map_err(|violation| NotecaseError::CorruptSnapshot(violation.to_string()))?;

        tracing::debug!(
            folders = store.folders.len(),
            notes = store.notes.len(),
            "content store assembled"
        );
        Ok(store)
    }

    #[must_use]
    pub const fn root_id(&self) -> &EntityId {
        &self.root
    }

    #[must_use]
    pub fn folder(&self, id: &EntityId) -> Option<&Folder> {
        self.folders.get(id)
    }

    #[must_use]
    pub fn note(&self, id: &EntityId) -> Option<&Note> {
        self.notes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.folders.contains_key(id) || self.notes.contains_key(id)
    }

    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    #[must_use]
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Iterates over all folders in unspecified order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// Iterates over all notes in unspecified order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Resolves an identifier to the folder or note it names.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::NotFound`] if the identifier names neither.
    pub fn resolve(&self, id: &EntityId) -> Result<Entity<'_>> {
        if let Some(folder) = self.folders.get(id) {
            return Ok(Entity::Folder(folder));
        }
        self.notes
            .get(id)
            .map(Entity::Note)
            .ok_or_else(|| NotecaseError::NotFound(id.clone()))
    }

    /// Creates an empty folder at the end of `parent`'s child folders.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::ParentNotFound`] if `parent` is not a folder.
    pub fn create_folder(&mut self, parent: &EntityId, name: &str) -> Result<EntityId> {
        let _span = tracing::debug_span!("create_folder", parent = %parent, name = %name).entered();

        if !self.folders.contains_key(parent) {
            return Err(NotecaseError::ParentNotFound(parent.clone()));
        }

        let id = self.allocate_id();
        self.folders
            .insert(id.clone(), Folder::new(id.clone(), name, Some(parent.clone())));
        self.folder_mut(parent)?.folders.push(id.clone());

        tracing::debug!(id = %id, "folder created");
        Ok(id)
    }

    /// Creates a note with templated content at the end of `parent`'s child notes.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::ParentNotFound`] if `parent` is not a folder.
    pub fn create_note(&mut self, parent: &EntityId, name: &str) -> Result<EntityId> {
        let _span = tracing::debug_span!("create_note", parent = %parent, name = %name).entered();

        if !self.folders.contains_key(parent) {
            return Err(NotecaseError::ParentNotFound(parent.clone()));
        }

        let id = self.allocate_id();
        self.notes
            .insert(id.clone(), Note::new(id.clone(), name, parent.clone()));
        self.folder_mut(parent)?.notes.push(id.clone());

        tracing::debug!(id = %id, "note created");
        Ok(id)
    }

    /// Renames a folder or a note.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::NotFound`] if the identifier names neither.
    pub fn rename_entity(&mut self, id: &EntityId, new_name: &str) -> Result<()> {
        let _span = tracing::debug_span!("rename_entity", id = %id, new_name = %new_name).entered();

        if let Some(folder) = self.folders.get_mut(id) {
            folder.name = new_name.to_string();
        } else if let Some(note) = self.notes.get_mut(id) {
            note.name = new_name.to_string();
        } else {
            return Err(NotecaseError::NotFound(id.clone()));
        }

        tracing::debug!("entity renamed");
        Ok(())
    }

    /// Replaces the whole content of a note.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::NotFound`] if `id` is not a note.
    pub fn set_note_content(&mut self, id: &EntityId, text: &str) -> Result<()> {
        let _span = tracing::debug_span!("set_note_content", id = %id).entered();

        let note = self
            .notes
            .get_mut(id)
            .ok_or_else(|| NotecaseError::NotFound(id.clone()))?;
        note.content = text.to_string();

        tracing::debug!(content_len = text.len(), "note content replaced");
        Ok(())
    }

    /// Deletes a note, or a folder together with everything below it.
    ///
    /// Descendants are disposed depth-first before the folder itself is unlinked
    /// from its parent. Returns every identifier that was removed, deepest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::CannotDeleteRoot`] for the root folder and
    /// [`NotecaseError::NotFound`] for unknown identifiers.
    pub fn delete_entity(&mut self, id: &EntityId) -> Result<Vec<EntityId>> {
        let _span = tracing::debug_span!("delete_entity", id = %id).entered();

        if *id == self.root {
            return Err(NotecaseError::CannotDeleteRoot);
        }

        let mut removed = Vec::new();

        if let Some(parent) = self.folders.get(id).map(|folder| folder.parent.clone()) {
            self.dispose_folder(id, &mut removed);
            if let Some(parent) = parent.and_then(|parent| self.folders.get_mut(&parent)) {
                parent.folders.retain(|child| child != id);
            }
        } else if let Some(note) = self.notes.remove(id) {
            self.ids.retire(id);
            if let Some(parent) = self.folders.get_mut(&note.folder) {
                parent.notes.retain(|child| child != id);
            }
            removed.push(note.id);
        } else {
            return Err(NotecaseError::NotFound(id.clone()));
        }

        tracing::debug!(removed = removed.len(), "entity deleted");
        Ok(removed)
    }

    /// Moves a folder or note to the end of another folder's children.
    ///
    /// Moving an entity into the folder it already lives in is a no-op.
    ///
    /// # Errors
    ///
    /// - [`NotecaseError::NotFound`] if `id` names nothing
    /// - [`NotecaseError::ParentNotFound`] if `new_parent` is not a folder
    /// - [`NotecaseError::CannotMoveRoot`] for the root folder
    /// - [`NotecaseError::CycleDetected`] when a folder would end up inside itself
    pub fn move_entity(&mut self, id: &EntityId, new_parent: &EntityId) -> Result<()> {
        let _span = tracing::debug_span!("move_entity", id = %id, new_parent = %new_parent).entered();

        if !self.folders.contains_key(new_parent) {
            return Err(NotecaseError::ParentNotFound(new_parent.clone()));
        }

        if let Some(folder) = self.folders.get(id) {
            let Some(old_parent) = folder.parent.clone() else {
                return Err(NotecaseError::CannotMoveRoot);
            };
            if self.is_descendant_or_self(new_parent, id) {
                return Err(NotecaseError::CycleDetected {
                    id: id.clone(),
                    parent: new_parent.clone(),
                });
            }
            if old_parent == *new_parent {
                return Ok(());
            }

            self.folder_mut(&old_parent)?.folders.retain(|child| child != id);
            self.folder_mut(new_parent)?.folders.push(id.clone());
            self.folder_mut(id)?.parent = Some(new_parent.clone());
        } else if let Some(note) = self.notes.get(id) {
            let old_parent = note.folder.clone();
            if old_parent == *new_parent {
                return Ok(());
            }

            self.folder_mut(&old_parent)?.notes.retain(|child| child != id);
            self.folder_mut(new_parent)?.notes.push(id.clone());
            if let Some(note) = self.notes.get_mut(id) {
                note.folder = new_parent.clone();
            }
        } else {
            return Err(NotecaseError::NotFound(id.clone()));
        }

        tracing::debug!("entity moved");
        Ok(())
    }

    /// Returns the resolved children of a folder in display order.
    ///
    /// Unknown folders yield empty children and stale child identifiers are
    /// skipped.
    #[must_use]
    pub fn children(&self, folder: &EntityId) -> Children<'_> {
        let Some(folder) = self.folders.get(folder) else {
            tracing::debug!(folder = %folder, "children requested for unknown folder");
            return Children::default();
        };

        Children {
            folders: folder
                .folders
                .iter()
                .filter_map(|id| self.folders.get(id))
                .collect(),
            notes: folder
                .notes
                .iter()
                .filter_map(|id| self.notes.get(id))
                .collect(),
        }
    }

    /// Returns the chain of folders from the root down to `folder`, inclusive.
    ///
    /// Unknown folders yield an empty chain.
    #[must_use]
    pub fn ancestors(&self, folder: &EntityId) -> Vec<&Folder> {
        let mut chain = Vec::new();
        let mut next = self.folders.get(folder);

        while let Some(current) = next {
            if chain.len() > self.folders.len() {
                tracing::warn!(folder = %folder, "parent chain does not terminate");
                return Vec::new();
            }
            chain.push(current);
            next = current.parent.as_ref().and_then(|parent| self.folders.get(parent));
        }

        chain.reverse();
        chain
    }

    /// Returns `true` if `candidate` is `ancestor` or lies below it.
    #[must_use]
    pub fn is_descendant_or_self(&self, candidate: &EntityId, ancestor: &EntityId) -> bool {
        self.ancestors(candidate)
            .iter()
            .any(|folder| folder.id == *ancestor)
    }

    /// Checks every tree invariant and reports the first one that fails.
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] found.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        let mut roots = self.folders.values().filter(|folder| folder.is_root());
        let root = roots.next().ok_or(InvariantViolation::NoRoot)?;
        if let Some(second) = roots.next() {
            return Err(InvariantViolation::MultipleRoots {
                first: root.id.clone(),
                second: second.id.clone(),
            });
        }
        if root.id != self.root {
            return Err(InvariantViolation::NoRoot);
        }

        if let Some(shared) = self.notes.keys().find(|id| self.folders.contains_key(*id)) {
            return Err(InvariantViolation::SharedIdentifier { id: shared.clone() });
        }

        let mut listed: HashSet<&EntityId> = HashSet::new();

        for folder in self.folders.values() {
            if let Some(parent) = &folder.parent {
                if !self.folders.contains_key(parent) {
                    return Err(InvariantViolation::DanglingParent {
                        folder: folder.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }

            for child in &folder.folders {
                let resolved = self.folders.get(child).ok_or_else(|| {
                    InvariantViolation::DanglingChild {
                        parent: folder.id.clone(),
                        child: child.clone(),
                    }
                })?;
                if resolved.parent.as_ref() != Some(&folder.id) {
                    return Err(InvariantViolation::ParentMismatch {
                        parent: folder.id.clone(),
                        child: child.clone(),
                    });
                }
                if !listed.insert(child) {
                    return Err(InvariantViolation::AliasedChild { child: child.clone() });
                }
            }

            for child in &folder.notes {
                let resolved = self.notes.get(child).ok_or_else(|| {
                    InvariantViolation::DanglingChild {
                        parent: folder.id.clone(),
                        child: child.clone(),
                    }
                })?;
                if resolved.folder != folder.id {
                    return Err(InvariantViolation::ParentMismatch {
                        parent: folder.id.clone(),
                        child: child.clone(),
                    });
                }
                if !listed.insert(child) {
                    return Err(InvariantViolation::AliasedChild { child: child.clone() });
                }
            }
        }

        if let Some(orphan) = self
            .folders
            .values()
            .filter(|folder| !folder.is_root())
            .map(|folder| &folder.id)
            .chain(self.notes.keys())
            .find(|id| !listed.contains(*id))
        {
            return Err(InvariantViolation::Orphan { id: orphan.clone() });
        }

        // With consistent links, folders unreachable from the root can only sit on a cycle.
        let mut reached: HashSet<&EntityId> = HashSet::new();
        let mut pending = vec![&self.root];
        while let Some(id) = pending.pop() {
            if reached.insert(id) {
                if let Some(folder) = self.folders.get(id) {
                    pending.extend(folder.folders.iter());
                }
            }
        }
        if let Some(unreached) = self.folders.keys().find(|id| !reached.contains(*id)) {
            return Err(InvariantViolation::Cycle {
                folder: unreached.clone(),
            });
        }

        Ok(())
    }

    fn allocate_id(&mut self) -> EntityId {
        let folders = &self.folders;
        let notes = &self.notes;
        self.ids
            .next_id(|candidate| folders.contains_key(candidate) || notes.contains_key(candidate))
    }

    fn folder_mut(&mut self, id: &EntityId) -> Result<&mut Folder> {
        self.folders
            .get_mut(id)
            .ok_or_else(|| NotecaseError::NotFound(id.clone()))
    }

    fn dispose_folder(&mut self, id: &EntityId, removed: &mut Vec<EntityId>) {
        let Some(folder) = self.folders.get(id) else {
            return;
        };
        let child_folders = folder.folders.clone();
        let child_notes = folder.notes.clone();

        for child in &child_folders {
            self.dispose_folder(child, removed);
        }
        for note in child_notes {
            if self.notes.remove(&note).is_some() {
                self.ids.retire(&note);
                removed.push(note);
            }
        }

        self.folders.remove(id);
        self.ids.retire(id);
        removed.push(id.clone());
    }
}
