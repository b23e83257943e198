//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything a session
//! works on: the content tree, the navigation cursor, the open note and the
//! layout flags. There is no global state; the event handler receives the state
//! explicitly.
//!
//! # Example
//!
//! ```rust
//! use notecase::app::AppState;
//! use notecase::domain::{EntityId, Snapshot};
//! use notecase::markup::RenderOptions;
//!
//! let mut state = AppState::from_snapshot(Snapshot::default(), RenderOptions::default());
//! state.selected_note = Some(EntityId::from("ideas"));
//! assert!(state.preview().unwrap().starts_with("<h1>Ideas 💡</h1>"));
//! ```

use crate::app::viewmodel::{self, SidebarViewModel, TreeLine};
use crate::domain::{ContentStore, EditorMode, EntityId, NavigationCursor, Note, Snapshot};
use crate::markup::{self, RenderOptions};

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Owner of all folders and notes.
    pub store: ContentStore,

    /// Path from the root to the folder being viewed.
    pub cursor: NavigationCursor,

    /// Note open in the editor, if any.
    pub selected_note: Option<EntityId>,

    pub editor_mode: EditorMode,

    pub sidebar_visible: bool,

    /// Options used by [`preview`](Self::preview). Not persisted.
    pub render_options: RenderOptions,
}

impl AppState {
    /// Builds state from a snapshot, repairing a stale cursor or selection.
    #[must_use]
    pub fn from_snapshot(mut snapshot: Snapshot, render_options: RenderOptions) -> Self {
        if snapshot.normalize() {
            tracing::debug!("snapshot view state repaired on open");
        }

        Self {
            store: snapshot.store,
            cursor: snapshot.cursor,
            selected_note: snapshot.selected_note,
            editor_mode: snapshot.editor_mode,
            sidebar_visible: snapshot.sidebar_visible,
            render_options,
        }
    }

    /// Copies the persisted part of the state.
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            store: self.store.clone(),
            cursor: self.cursor.clone(),
            selected_note: self.selected_note.clone(),
            editor_mode: self.editor_mode,
            sidebar_visible: self.sidebar_visible,
        }
    }

    /// Folder the user is looking at.
    #[must_use]
    pub fn current_folder(&self) -> &EntityId {
        self.cursor.current_folder(&self.store)
    }

    /// The open note, if the selection still resolves.
    #[must_use]
    pub fn selected(&self) -> Option<&Note> {
        self.selected_note.as_ref().and_then(|id| self.store.note(id))
    }

    /// Computes the sidebar for the current folder.
    #[must_use]
    pub fn sidebar(&self) -> SidebarViewModel {
        let _span = tracing::trace_span!("compute_sidebar").entered();
        viewmodel::compute_sidebar(&self.store, self.current_folder(), self.selected_note.as_ref())
    }

    /// Renders the open note's content.
    #[must_use]
    pub fn preview(&self) -> Option<String> {
        self.selected()
            .map(|note| markup::render_with(&note.content, &self.render_options))
    }

    /// Lists the whole tree depth first.
    #[must_use]
    pub fn tree(&self) -> Vec<TreeLine> {
        viewmodel::tree_lines(&self.store)
    }
}
