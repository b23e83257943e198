//! Actions representing side effects to be executed by the session runtime.
//!
//! The event handler only mutates in-memory state. Everything that has to
//! happen outside of it (writing the snapshot, telling the display layer to show
//! or hide the editor) is returned as an [`Action`] and executed by
//! [`Session`](crate::app::Session) in order.
//!
//! # Example
//!
//! ```rust
//! use notecase::app::Action;
//! use notecase::domain::EntityId;
//!
//! let actions = vec![
//!     Action::OpenEditor { note: EntityId::from("welcome") },
//!     Action::Persist,
//! ];
//! assert!(actions.contains(&Action::Persist));
//! ```

use crate::domain::EntityId;

/// Commands representing side effects of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Writes the full snapshot through to storage.
    ///
    /// Emitted by every event that changed persisted state.
    Persist,

    /// Shows the editor for a note.
    OpenEditor {
        /// Note that became selected.
        note: EntityId,
    },

    /// Hides the editor because the selected note is gone.
    CloseEditor,
}
