//! Event handling and state transition logic.
//!
//! This module implements the event handler that turns user intents into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the command line or an embedding display layer
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations go through the [`ContentStore`](crate::domain::ContentStore)
//!    and [`NavigationCursor`](crate::domain::NavigationCursor)
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `OpenFolder`, `GoToParent`, `GoToRoot`, `OpenNote`
//! - **Content**: `CreateFolder`, `CreateNote`, `RenameEntity`, `EditNote`,
//!   `DeleteEntity`, `MoveEntity`
//! - **Layout**: `SetEditorMode`, `ToggleSidebar`
//!
//! # Example
//!
//! ```rust
//! use notecase::app::{handle_event, Action, AppState, Event};
//! use notecase::domain::Snapshot;
//! use notecase::markup::RenderOptions;
//!
//! let mut state = AppState::from_snapshot(Snapshot::default(), RenderOptions::default());
//! let (changed, actions) = handle_event(&mut state, &Event::CreateFolder { name: "Books".into() })?;
//! assert!(changed);
//! assert_eq!(actions, vec![Action::Persist]);
//! # Ok::<(), notecase::NotecaseError>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::{NotecaseError, Result};
use crate::domain::{EditorMode, EntityId};

/// User intents understood by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Descends into a child folder of the current folder.
    OpenFolder(EntityId),
    /// Goes up one level (no-op at the root).
    GoToParent,
    /// Returns to the root.
    GoToRoot,
    /// Opens a note in the editor.
    OpenNote(EntityId),

    /// Creates a folder in the current folder. Blank names are ignored.
    CreateFolder { name: String },
    /// Creates a note in the current folder and opens it. Blank names are ignored.
    CreateNote { name: String },
    /// Renames a folder or note. Blank names are ignored.
    RenameEntity { id: EntityId, name: String },
    /// Replaces the open note's content (no-op when nothing is open).
    EditNote { content: String },
    /// Deletes a note, or a folder and everything below it.
    DeleteEntity(EntityId),
    /// Moves a folder or note to the end of another folder.
    MoveEntity { id: EntityId, parent: EntityId },

    SetEditorMode(EditorMode),
    ToggleSidebar,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag says whether anything visible changed. Every change to
/// persisted state is followed by [`Action::Persist`].
///
/// # Errors
///
/// Propagates write-path errors from the store and cursor (`NotFound`,
/// `ParentNotFound`, `CannotDeleteRoot`, `CycleDetected`, `InvalidDescent`, ...).
/// State is left unchanged when an error is returned.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::OpenFolder(id) => {
            state.cursor.enter(&state.store, id)?;
            Ok((true, vec![Action::Persist]))
        }
        Event::GoToParent => {
            if state.cursor.leave().is_none() {
                tracing::debug!("already at root");
                return Ok((false, vec![]));
            }
            Ok((true, vec![Action::Persist]))
        }
        Event::GoToRoot => {
            if state.cursor.is_at_root() {
                return Ok((false, vec![]));
            }
            state.cursor.reset();
            Ok((true, vec![Action::Persist]))
        }
        Event::OpenNote(id) => {
            if state.store.note(id).is_none() {
                return Err(NotecaseError::NotFound(id.clone()));
            }
            state.selected_note = Some(id.clone());
            tracing::debug!(note = %id, "note opened");
            Ok((true, vec![Action::OpenEditor { note: id.clone() }, Action::Persist]))
        }
        Event::CreateFolder { name } => {
            let Some(name) = non_blank(name) else {
                tracing::debug!("ignoring blank folder name");
                return Ok((false, vec![]));
            };
            let parent = state.current_folder().clone();
            state.store.create_folder(&parent, name)?;
            Ok((true, vec![Action::Persist]))
        }
        Event::CreateNote { name } => {
            let Some(name) = non_blank(name) else {
                tracing::debug!("ignoring blank note name");
                return Ok((false, vec![]));
            };
            let parent = state.current_folder().clone();
            let id = state.store.create_note(&parent, name)?;
            state.selected_note = Some(id.clone());
            Ok((true, vec![Action::OpenEditor { note: id }, Action::Persist]))
        }
        Event::RenameEntity { id, name } => {
            let Some(name) = non_blank(name) else {
                tracing::debug!("ignoring blank name");
                return Ok((false, vec![]));
            };
            state.store.rename_entity(id, name)?;
            Ok((true, vec![Action::Persist]))
        }
        Event::EditNote { content } => {
            let Some(id) = state.selected_note.clone() else {
                tracing::debug!("no note open, ignoring edit");
                return Ok((false, vec![]));
            };
            if state.store.note(&id).is_some_and(|note| note.content == *content) {
                return Ok((false, vec![]));
            }
            state.store.set_note_content(&id, content)?;
            Ok((true, vec![Action::Persist]))
        }
        Event::DeleteEntity(id) => {
            let removed = state.store.delete_entity(id)?;
            let mut actions = Vec::new();

            if state
                .selected_note
                .as_ref()
                .is_some_and(|selected| removed.contains(selected))
            {
                tracing::debug!("open note was deleted, closing editor");
                state.selected_note = None;
                actions.push(Action::CloseEditor);
            }
            if state.cursor.revalidate(&state.store) {
                tracing::debug!("current folder was deleted, back at root");
            }

            actions.push(Action::Persist);
            Ok((true, actions))
        }
        Event::MoveEntity { id, parent } => {
            state.store.move_entity(id, parent)?;
            state.cursor.revalidate(&state.store);
            Ok((true, vec![Action::Persist]))
        }
        Event::SetEditorMode(mode) => {
            if state.editor_mode == *mode {
                return Ok((false, vec![]));
            }
            state.editor_mode = *mode;
            Ok((true, vec![Action::Persist]))
        }
        Event::ToggleSidebar => {
            state.sidebar_visible = !state.sidebar_visible;
            tracing::debug!(visible = state.sidebar_visible, "sidebar toggled");
            Ok((true, vec![Action::Persist]))
        }
    }
}

fn non_blank(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Snapshot;
    use crate::markup::RenderOptions;

    fn seeded_state() -> AppState {
        AppState::from_snapshot(Snapshot::default(), RenderOptions::default())
    }

    #[test]
    fn navigation_events() {
        let mut state = seeded_state();

        let (changed, actions) = handle_event(&mut state, &Event::GoToParent).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());

        handle_event(&mut state, &Event::OpenFolder(EntityId::from("personal"))).unwrap();
        handle_event(&mut state, &Event::OpenFolder(EntityId::from("projects"))).unwrap();
        assert_eq!(state.current_folder().as_str(), "projects");

        assert!(matches!(
            handle_event(&mut state, &Event::OpenFolder(EntityId::from("work"))),
            Err(NotecaseError::InvalidDescent { .. })
        ));

        handle_event(&mut state, &Event::GoToParent).unwrap();
        assert_eq!(state.current_folder().as_str(), "personal");

        let (changed, _) = handle_event(&mut state, &Event::GoToRoot).unwrap();
        assert!(changed);
        assert!(state.cursor.is_at_root());
    }

    #[test]
    fn create_note_opens_it_in_current_folder() {
        let mut state = seeded_state();
        handle_event(&mut state, &Event::OpenFolder(EntityId::from("work"))).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::CreateNote {
                name: "  Retro  ".into(),
            },
        )
        .unwrap();

        let note = state.selected().unwrap();
        assert_eq!(note.name, "Retro");
        assert_eq!(note.folder.as_str(), "work");
        assert_eq!(
            actions,
            vec![
                Action::OpenEditor {
                    note: note.id.clone()
                },
                Action::Persist
            ]
        );
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut state = seeded_state();
        let before = state.clone();

        for event in [
            Event::CreateFolder { name: "   ".into() },
            Event::CreateNote { name: String::new() },
            Event::RenameEntity {
                id: EntityId::from("work"),
                name: "\t".into(),
            },
        ] {
            let (changed, actions) = handle_event(&mut state, &event).unwrap();
            assert!(!changed);
            assert!(actions.is_empty());
        }
        assert_eq!(state, before);
    }

    #[test]
    fn edit_without_selection_is_a_noop() {
        let mut state = seeded_state();
        let (changed, actions) = handle_event(
            &mut state,
            &Event::EditNote {
                content: "x".into(),
            },
        )
        .unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn edit_replaces_selected_content() {
        let mut state = seeded_state();
        handle_event(&mut state, &Event::OpenNote(EntityId::from("ideas"))).unwrap();
        handle_event(
            &mut state,
            &Event::EditNote {
                content: "**new**".into(),
            },
        )
        .unwrap();

        assert_eq!(state.selected().unwrap().content, "**new**");
        assert_eq!(
            state.preview().as_deref(),
            Some("<p><strong>new</strong></p>")
        );
    }

    #[test]
    fn deleting_ancestor_of_selection_closes_editor_and_resets_cursor() {
        let mut state = seeded_state();
        handle_event(&mut state, &Event::OpenFolder(EntityId::from("personal"))).unwrap();
        handle_event(&mut state, &Event::OpenFolder(EntityId::from("projects"))).unwrap();
        handle_event(&mut state, &Event::OpenNote(EntityId::from("webapp"))).unwrap();

        let (_, actions) =
            handle_event(&mut state, &Event::DeleteEntity(EntityId::from("personal"))).unwrap();

        assert_eq!(actions, vec![Action::CloseEditor, Action::Persist]);
        assert_eq!(state.selected_note, None);
        assert!(state.cursor.is_at_root());
        assert!(state.store.validate().is_ok());
    }

    #[test]
    fn errors_propagate_without_changes() {
        let mut state = seeded_state();
        let before = state.clone();

        let root = state.store.root_id().clone();
        assert!(matches!(
            handle_event(&mut state, &Event::DeleteEntity(root)),
            Err(NotecaseError::CannotDeleteRoot)
        ));
        assert!(matches!(
            handle_event(&mut state, &Event::OpenNote(EntityId::from("work"))),
            Err(NotecaseError::NotFound(_))
        ));
        assert!(matches!(
            handle_event(
                &mut state,
                &Event::MoveEntity {
                    id: EntityId::from("personal"),
                    parent: EntityId::from("projects"),
                }
            ),
            Err(NotecaseError::CycleDetected { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn layout_events() {
        let mut state = seeded_state();

        let (changed, _) =
            handle_event(&mut state, &Event::SetEditorMode(EditorMode::Edit)).unwrap();
        assert!(!changed);

        let (changed, actions) =
            handle_event(&mut state, &Event::SetEditorMode(EditorMode::Split)).unwrap();
        assert!(changed);
        assert_eq!(actions, vec![Action::Persist]);

        handle_event(&mut state, &Event::ToggleSidebar).unwrap();
        assert!(!state.sidebar_visible);
    }
}
