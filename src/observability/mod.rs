//! Logging setup on top of `tracing`.
//!
//! Every layer of the crate emits `tracing` spans and events. This module
//! installs the subscriber that writes them, as plain text lines, to a size
//! rotated log file in the data directory.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → notecase.log (+ 3 backups)
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use notecase::observability::init_tracing;
//! use notecase::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("notecase initialized");
//! ```
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
