//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the outer surfaces (the command line, or any
//! display layer embedding the crate) and the domain/storage layers.
//!
//! # Architecture
//!
//! ```text
//! User Intent → Event → Event Handler → State Mutations → Actions → Side Effects
//!                                                             │
//!                                         Persist ────────────┴──→ SnapshotGateway
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`state`]: Central application state container
//! - [`viewmodel`]: Display-ready sidebar and tree listings
//! - [`session`]: Runtime executing actions with write-through persistence
//!
//! # Example
//!
//! ```rust
//! use notecase::app::{Event, Session};
//! use notecase::domain::EntityId;
//! use notecase::markup::RenderOptions;
//! use notecase::storage::MemoryStore;
//!
//! let mut session = Session::open(MemoryStore::new(), "notesApp", RenderOptions::default());
//! session.dispatch(&Event::OpenFolder(EntityId::from("work")))?;
//! assert_eq!(session.state().sidebar().header.title, "Work");
//! # Ok::<(), notecase::NotecaseError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod session;
pub mod state;
pub mod viewmodel;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use session::{Dispatch, Session};
pub use state::AppState;
pub use viewmodel::{EmptyState, HeaderInfo, SidebarItem, SidebarViewModel, TreeLine};
