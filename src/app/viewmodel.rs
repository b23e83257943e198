//! View model types representing what the display layer shows.
//!
//! View models are immutable snapshots computed from [`AppState`](crate::app::AppState).
//! They contain display-ready data only: names are resolved, items are ordered
//! and selection is pre-computed, so a renderer never touches the store.
//!
//! # Example
//!
//! ```rust
//! use notecase::app::AppState;
//! use notecase::domain::Snapshot;
//! use notecase::markup::RenderOptions;
//!
//! let state = AppState::from_snapshot(Snapshot::default(), RenderOptions::default());
//! let sidebar = state.sidebar();
//! assert_eq!(sidebar.header.title, "All Notes");
//! assert!(!sidebar.show_back);
//! assert_eq!(sidebar.items.len(), 3);
//! ```

use crate::domain::{ContentStore, EntityId, EntityKind};

/// Message shown for a folder without children.
pub const EMPTY_FOLDER_MESSAGE: &str = "This folder is empty";

/// Everything needed to draw the sidebar for the current folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarViewModel {
    pub header: HeaderInfo,

    /// Whether a "back" control is offered (false at the root).
    pub show_back: bool,

    /// Child folders first, then child notes, each in stored order.
    pub items: Vec<SidebarItem>,

    /// Present only when `items` is empty.
    pub empty_state: Option<EmptyState>,
}

/// Title and location of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Name of the current folder; the root shows as "All Notes".
    pub title: String,

    /// Folder names from the root down to the current folder.
    pub breadcrumb: Vec<String>,
}

/// One row of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,

    /// True for the note open in the editor. Folders are never selected.
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// One line of a depth-first listing of the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Nesting level; the root's children are at depth 0.
    pub depth: usize,
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
}

pub(crate) fn compute_sidebar(
    store: &ContentStore,
    folder: &EntityId,
    selected_note: Option<&EntityId>,
) -> SidebarViewModel {
    let breadcrumb: Vec<String> = store
        .ancestors(folder)
        .iter()
        .map(|f| f.name.clone())
        .collect();
    let title = breadcrumb
        .last()
        .cloned()
        .unwrap_or_else(|| crate::domain::ROOT_NAME.to_string());

    let children = store.children(folder);
    let items: Vec<SidebarItem> = children
        .folders
        .iter()
        .map(|f| SidebarItem {
            id: f.id.clone(),
            kind: EntityKind::Folder,
            name: f.name.clone(),
            is_selected: false,
        })
        .chain(children.notes.iter().map(|n| SidebarItem {
            id: n.id.clone(),
            kind: EntityKind::Note,
            name: n.name.clone(),
            is_selected: selected_note == Some(&n.id),
        }))
        .collect();

    let empty_state = items.is_empty().then(|| EmptyState {
        message: EMPTY_FOLDER_MESSAGE.to_string(),
    });

    SidebarViewModel {
        header: HeaderInfo { title, breadcrumb },
        show_back: folder != store.root_id(),
        items,
        empty_state,
    }
}

/// Lists every folder and note below the root, depth first, folders before notes.
#[must_use]
pub fn tree_lines(store: &ContentStore) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    push_subtree(store, store.root_id(), 0, &mut lines);
    lines
}

fn push_subtree(store: &ContentStore, folder: &EntityId, depth: usize, lines: &mut Vec<TreeLine>) {
    // A valid tree is never deeper than it has folders.
    if depth > store.folder_count() {
        return;
    }

    let children = store.children(folder);
    for child in children.folders {
        lines.push(TreeLine {
            depth,
            id: child.id.clone(),
            kind: EntityKind::Folder,
            name: child.name.clone(),
        });
        push_subtree(store, &child.id, depth + 1, lines);
    }
    for note in children.notes {
        lines.push(TreeLine {
            depth,
            id: note.id.clone(),
            kind: EntityKind::Note,
            name: note.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_folder_sidebar() {
        let store = ContentStore::seeded();
        let personal = EntityId::from("personal");
        let ideas = EntityId::from("ideas");

        let vm = compute_sidebar(&store, &personal, Some(&ideas));

        assert_eq!(vm.header.title, "Personal");
        assert_eq!(vm.header.breadcrumb, vec!["All Notes", "Personal"]);
        assert!(vm.show_back);
        let names: Vec<&str> = vm.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Projects", "Ideas", "Daily Journal"]);
        let selected: Vec<bool> = vm.items.iter().map(|i| i.is_selected).collect();
        assert_eq!(selected, vec![false, true, false]);
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn empty_folder_has_message() {
        let mut store = ContentStore::new();
        let root = store.root_id().clone();
        let folder = store.create_folder(&root, "Empty").unwrap();

        let vm = compute_sidebar(&store, &folder, None);
        assert!(vm.items.is_empty());
        assert_eq!(
            vm.empty_state,
            Some(EmptyState {
                message: "This folder is empty".to_string()
            })
        );
    }

    #[test]
    fn tree_lines_follow_display_order() {
        let store = ContentStore::seeded();
        let all = tree_lines(&store);
        let lines: Vec<(usize, &str)> = all
            .iter()
            .map(|line| (line.depth, line.id.as_str()))
            .collect();

        assert_eq!(
            lines,
            vec![
                (0, "personal"),
                (1, "projects"),
                (2, "webapp"),
                (1, "ideas"),
                (1, "journal"),
                (0, "work"),
                (1, "meetings"),
                (1, "tasks"),
                (0, "welcome"),
            ]
        );
    }
}
