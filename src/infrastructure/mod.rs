//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where notecase keeps its files on the host: the data
//! directory (snapshot and log file) and `~` expansion for configured paths.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde, DATA_DIR_ENV};
