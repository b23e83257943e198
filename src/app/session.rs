//! Session runtime executing actions against storage.
//!
//! A [`Session`] owns the [`AppState`] and a [`SnapshotGateway`]. It feeds events
//! to [`handle_event`] and executes the returned actions in order. Persistence is
//! write-through: every [`Action::Persist`] saves the full snapshot before
//! `dispatch` returns.
//!
//! The executed actions are handed back in a [`Dispatch`] so the display layer
//! can react to [`Action::OpenEditor`] and [`Action::CloseEditor`].

use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::domain::EntityId;
use crate::markup::RenderOptions;
use crate::storage::{KeyValueStore, SnapshotGateway};

/// What one dispatched event did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Whether anything visible changed.
    pub changed: bool,

    /// Actions executed, in order.
    pub actions: Vec<Action>,
}

impl Dispatch {
    /// The note the editor should now show, if the event opened one.
    #[must_use]
    pub fn opened_note(&self) -> Option<&EntityId> {
        self.actions.iter().find_map(|action| match action {
            Action::OpenEditor { note } => Some(note),
            _ => None,
        })
    }

    /// Whether the editor should be closed.
    #[must_use]
    pub fn closed_editor(&self) -> bool {
        self.actions.contains(&Action::CloseEditor)
    }
}

#[derive(Debug)]
pub struct Session<S> {
    state: AppState,
    gateway: SnapshotGateway<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads the snapshot stored under `key` (or the default tree) and starts a session.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::app::{Event, Session};
    /// use notecase::markup::RenderOptions;
    /// use notecase::storage::MemoryStore;
    ///
    /// let mut session = Session::open(MemoryStore::new(), "notesApp", RenderOptions::default());
    /// session.dispatch(&Event::CreateNote { name: "Groceries".into() })?;
    ///
    /// let reopened = Session::open(session.into_store(), "notesApp", RenderOptions::default());
    /// assert_eq!(reopened.state().selected().unwrap().name, "Groceries");
    /// # Ok::<(), notecase::NotecaseError>(())
    /// ```
    pub fn open(store: S, key: impl Into<String>, render_options: RenderOptions) -> Self {
        let gateway = SnapshotGateway::new(store, key);
        let state = AppState::from_snapshot(gateway.load(), render_options);

        tracing::info!(
            key = %gateway.key(),
            folders = state.store.folder_count(),
            notes = state.store.note_count(),
            "session opened"
        );
        Self { state, gateway }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn gateway(&self) -> &SnapshotGateway<S> {
        &self.gateway
    }

    /// Gives back the underlying store.
    pub fn into_store(self) -> S {
        self.gateway.into_inner()
    }

    /// Handles one event and executes its actions.
    ///
    /// Returns whether anything visible changed together with the executed
    /// actions.
    ///
    /// # Errors
    ///
    /// Returns the handler's error, or a storage error if persisting fails. In
    /// the latter case the in-memory state keeps the change.
    pub fn dispatch(&mut self, event: &Event) -> Result<Dispatch> {
        let (changed, actions) = handle_event(&mut self.state, event)?;
        for action in &actions {
            self.execute(action)?;
        }
        Ok(Dispatch { changed, actions })
    }

    /// Saves the current state regardless of pending actions.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn persist(&mut self) -> Result<()> {
        self.gateway.save(&self.state.to_snapshot())
    }

    fn execute(&mut self, action: &Action) -> Result<()> {
        let _span = tracing::debug_span!("execute_action", action = ?action).entered();

        match action {
            Action::Persist => self.persist(),
            Action::OpenEditor { note } => {
                tracing::debug!(note = %note, mode = %self.state.editor_mode, "editor opened");
                Ok(())
            }
            Action::CloseEditor => {
                tracing::debug!("editor closed");
                Ok(())
            }
        }
    }
}
