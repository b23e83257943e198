//! The complete persisted application state.

use crate::domain::cursor::NavigationCursor;
use crate::domain::entity::EntityId;
use crate::domain::store::ContentStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which panes the editor shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    /// Raw text only.
    #[default]
    Edit,
    /// Rendered markup only.
    Preview,
    /// Raw text and rendered markup side by side.
    Split,
}

impl EditorMode {
    #[must_use]
    pub const fn shows_editor(self) -> bool {
        matches!(self, Self::Edit | Self::Split)
    }

    #[must_use]
    pub const fn shows_preview(self) -> bool {
        matches!(self, Self::Preview | Self::Split)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Preview => "preview",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "edit" => Ok(Self::Edit),
            "preview" => Ok(Self::Preview),
            "split" => Ok(Self::Split),
            other => Err(format!("unknown editor mode '{other}'")),
        }
    }
}

/// Everything that survives a restart: the tree, where the user is in it,
/// the open note and the layout flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub store: ContentStore,
    pub cursor: NavigationCursor,
    pub selected_note: Option<EntityId>,
    pub editor_mode: EditorMode,
    pub sidebar_visible: bool,
}

impl Default for Snapshot {
    /// The built-in example tree, viewed from the root with nothing open.
    fn default() -> Self {
        Self::from_store(ContentStore::seeded())
    }
}

impl Snapshot {
    /// Wraps a store with default view state.
    #[must_use]
    pub fn from_store(store: ContentStore) -> Self {
        Self {
            store,
            cursor: NavigationCursor::new(),
            selected_note: None,
            editor_mode: EditorMode::default(),
            sidebar_visible: true,
        }
    }

    /// Repairs view state that no longer matches the tree.
    ///
    /// A stale cursor is clamped to the root and a selection that does not name
    /// an existing note is cleared. Returns `true` if anything changed.
    pub fn normalize(&mut self) -> bool {
        let clamped = self.cursor.revalidate(&self.store);

        let dangling = self
            .selected_note
            .as_ref()
            .is_some_and(|id| self.store.note(id).is_none());
        if dangling {
            tracing::debug!(selected = ?self.selected_note, "dropping dangling selection");
            self.selected_note = None;
        }

        clamped || dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_starts_at_root() {
        let snapshot = Snapshot::default();
        assert!(snapshot.cursor.is_at_root());
        assert_eq!(snapshot.selected_note, None);
        assert_eq!(snapshot.editor_mode, EditorMode::Edit);
        assert!(snapshot.sidebar_visible);
        assert_eq!(snapshot.store.note_count(), 6);
    }

    #[test]
    fn normalize_repairs_stale_view_state() {
        let mut snapshot = Snapshot::default();
        snapshot.cursor = NavigationCursor::from_path(vec![EntityId::from("projects")]);
        snapshot.selected_note = Some(EntityId::from("work"));

        assert!(snapshot.normalize());
        assert!(snapshot.cursor.is_at_root());
        assert_eq!(snapshot.selected_note, None);
        assert!(!snapshot.normalize());
    }

    #[test]
    fn editor_mode_panes() {
        assert!(EditorMode::Split.shows_editor() && EditorMode::Split.shows_preview());
        assert!(!EditorMode::Preview.shows_editor());
        assert_eq!("PREVIEW".parse(), Ok(EditorMode::Preview));
        assert_eq!(EditorMode::Split.to_string(), "split");
    }
}
