//! Storage layer for persisting the application snapshot.
//!
//! This module provides the byte-level storage abstraction and the gateway that
//! turns a [`Snapshot`](crate::domain::Snapshot) into a JSON blob and back.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `memory`: In-memory backend
//! - `file`: JSON file backend with atomic writes
//! - `models`: Storage record types separate from domain models
//! - `gateway`: Snapshot load/save with fallback to the default tree

pub mod backend;
pub mod file;
pub mod gateway;
pub mod memory;
pub mod models;

pub use backend::KeyValueStore;
pub use file::FileStore;
pub use gateway::{SnapshotGateway, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStore;
pub use models::{FolderRecord, NoteRecord, SnapshotRecord};
