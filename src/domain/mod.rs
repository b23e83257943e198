//! Domain layer for notecase.
//!
//! This module contains the folder/note tree and everything that reasons about it,
//! independent of storage formats, configuration or the command line.
//!
//! # Organization
//!
//! - [`entity`]: Folder, note and identifier types
//! - [`store`]: The [`ContentStore`] owning the tree and enforcing its invariants
//! - [`cursor`]: The [`NavigationCursor`] path into the tree
//! - [`search`]: Fuzzy name search
//! - [`seed`]: The built-in example tree
//! - [`snapshot`]: The persisted application state
//! - [`ids`]: Identifier allocation
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use notecase::domain::{ContentStore, NavigationCursor, Result};
//!
//! fn build() -> Result<ContentStore> {
//!     let mut store = ContentStore::new();
//!     let root = store.root_id().clone();
//!     let work = store.create_folder(&root, "Work")?;
//!     store.create_note(&work, "Standup")?;
//!
//!     let mut cursor = NavigationCursor::new();
//!     cursor.enter(&store, &work)?;
//!     assert_eq!(store.children(cursor.current_folder(&store)).notes.len(), 1);
//!     Ok(store)
//! }
//! # build().unwrap();
//! ```

pub mod cursor;
pub mod entity;
pub mod error;
pub mod ids;
pub mod search;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use cursor::NavigationCursor;
pub use entity::{default_note_content, Entity, EntityId, EntityKind, Folder, Note};
pub use error::{NotecaseError, Result};
pub use search::SearchHit;
pub use snapshot::{EditorMode, Snapshot};
pub use store::{Children, ContentStore, InvariantViolation, ROOT_ID, ROOT_NAME};
