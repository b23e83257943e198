//! Error types for notecase.
//!
//! This module defines the centralized error type [`NotecaseError`] and a type alias
//! [`Result`] used throughout the crate. Write-path operations on the content tree
//! fail fast with one of these variants so callers can surface a message; read paths
//! are tolerant and never produce them.

use crate::domain::entity::EntityId;
use thiserror::Error;

/// The main error type for notecase operations.
///
/// Tree mutations report identifier problems (`NotFound`, `ParentNotFound`) and
/// structural refusals (`CannotDeleteRoot`, `CycleDetected`, ...). Storage and
/// configuration failures carry a description of what went wrong.
///
/// # Examples
///
/// ```
/// use notecase::domain::{EntityId, NotecaseError};
///
/// let err = NotecaseError::NotFound(EntityId::from("missing"));
/// assert_eq!(err.to_string(), "Entity not found: missing");
/// ```
#[derive(Debug, Error)]
pub enum NotecaseError {
    /// The identifier resolves to neither a folder nor a note.
    #[error("Entity not found: {0}")]
    NotFound(EntityId),

    /// The target parent of a create or move does not resolve to a folder.
    #[error("Parent folder not found: {0}")]
    ParentNotFound(EntityId),

    /// The root folder cannot be deleted.
    #[error("The root folder cannot be deleted")]
    CannotDeleteRoot,

    /// The root folder cannot be moved under another folder.
    #[error("The root folder cannot be moved")]
    CannotMoveRoot,

    /// Moving `id` under `parent` would make a folder its own ancestor.
    #[error("Cannot move {id} into {parent}: a folder cannot contain itself")]
    CycleDetected {
        /// Folder being moved.
        id: EntityId,
        /// Requested new parent (the folder itself or one of its descendants).
        parent: EntityId,
    },

    /// The cursor was asked to enter a folder that is not a child of the current one.
    #[error("Folder {folder} is not a child of the current folder {current}")]
    InvalidDescent {
        /// Folder the caller tried to enter.
        folder: EntityId,
        /// Folder the cursor is currently in.
        current: EntityId,
    },

    /// A persisted snapshot could not be parsed or violates the tree invariants.
    ///
    /// Snapshot loading recovers from this locally by falling back to the
    /// default tree; it only surfaces through the strict `try_load` path.
    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for notecase operations.
pub type Result<T> = std::result::Result<T, NotecaseError>;
