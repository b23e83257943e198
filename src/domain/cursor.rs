//! Navigation cursor over the folder tree.
//!
//! The cursor holds the path of folder identifiers from the root down to the
//! folder currently being viewed. An empty path means the root itself. It only
//! holds identifiers; the [`ContentStore`] stays the owner of every folder, so
//! operations that need to check the tree take the store by reference.

use crate::domain::entity::EntityId;
use crate::domain::error::{NotecaseError, Result};
use crate::domain::store::ContentStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    path: Vec<EntityId>,
}

impl NavigationCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a cursor from a persisted path without checking it.
    ///
    /// Call [`revalidate`](Self::revalidate) afterwards when the path comes from
    /// untrusted storage.
    #[must_use]
    pub const fn from_path(path: Vec<EntityId>) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &[EntityId] {
        &self.path
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_at_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the folder being viewed.
    ///
    /// That is the last path element, or the root when the path is empty or its
    /// last element no longer resolves to a folder.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::domain::{ContentStore, NavigationCursor};
    ///
    /// let mut store = ContentStore::new();
    /// let root = store.root_id().clone();
    /// let work = store.create_folder(&root, "Work").unwrap();
    ///
    /// let mut cursor = NavigationCursor::new();
    /// assert_eq!(cursor.current_folder(&store), &root);
    ///
    /// cursor.enter(&store, &work).unwrap();
    /// assert_eq!(cursor.current_folder(&store), &work);
    ///
    /// cursor.leave();
    /// assert_eq!(cursor.current_folder(&store), &root);
    /// ```
    #[must_use]
    pub fn current_folder<'a>(&'a self, store: &'a ContentStore) -> &'a EntityId {
        match self.path.last() {
            Some(last) if store.folder(last).is_some() => last,
            Some(last) => {
                tracing::debug!(folder = %last, "cursor points at missing folder, using root");
                store.root_id()
            }
            None => store.root_id(),
        }
    }

    /// Descends into a direct child folder of the current folder.
    ///
    /// # Errors
    ///
    /// - [`NotecaseError::NotFound`] if `folder` is not a folder
    /// - [`NotecaseError::InvalidDescent`] if it is not a child of the current folder
    ///
    /// The path is left unchanged on error.
    pub fn enter(&mut self, store: &ContentStore, folder: &EntityId) -> Result<()> {
        let target = store
            .folder(folder)
            .ok_or_else(|| NotecaseError::NotFound(folder.clone()))?;

        let current = self.current_folder(store);
        if target.parent.as_ref() != Some(current) {
            return Err(NotecaseError::InvalidDescent {
                folder: folder.clone(),
                current: current.clone(),
            });
        }

        self.path.push(folder.clone());
        tracing::debug!(folder = %folder, depth = self.path.len(), "entered folder");
        Ok(())
    }

    /// Goes up one level. Does nothing at the root.
    pub fn leave(&mut self) -> Option<EntityId> {
        let left = self.path.pop();
        tracing::debug!(left = ?left, depth = self.path.len(), "left folder");
        left
    }

    /// Returns to the root.
    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// Clamps the cursor to the root if its path no longer describes a descent
    /// from the root through existing folders.
    ///
    /// Returns `true` if the path had to be reset.
    pub fn revalidate(&mut self, store: &ContentStore) -> bool {
        let mut parent = store.root_id();
        let mut stale = None;
        for id in &self.path {
            let is_child = store
                .folder(id)
                .is_some_and(|folder| folder.parent.as_ref() == Some(parent));
            if !is_child {
                stale = Some(id.clone());
                break;
            }
            parent = id;
        }

        let Some(stale) = stale else {
            return false;
        };
        tracing::debug!(stale = %stale, "cursor path is stale, clamping to root");
        self.path.clear();
        true
    }
}
