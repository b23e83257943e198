//! Notecase: a personal note organizer with nested folders and lightweight markup.
//!
//! Notecase keeps short text documents ("notes") in a folder hierarchy and
//! renders them from a small markdown-like dialect:
//! - A folder/note tree whose invariants are checked in one place
//! - A navigation cursor that survives deletions and moves
//! - A regex-based rendering pipeline producing HTML fragments
//! - Write-through persistence of the whole state as one JSON blob
//! - Fuzzy name search over folders and notes
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command Line (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action execution (Session)                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Domain        │   │ Storage       │   │ Markup        │
//! │ (domain/)     │   │ (storage/)    │   │ (markup/)     │
//! │ - Tree store  │   │ - KV backends │   │ - Rule list   │
//! │ - Cursor      │   │ - JSON blob   │   │ - Options     │
//! │ - Search      │   │ - Gateway     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Observability                     │
//! │  - Data directory resolution (infrastructure/)      │
//! │  - tracing subscriber + rotating log (observability)│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Folder/note tree, cursor, search, errors
//! - [`markup`]: Text to HTML rendering
//! - [`storage`]: Key-value backends and snapshot persistence
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is read from a TOML file:
//!
//! ```toml
//! data_dir = "~/notes"
//! storage_key = "notesApp"
//! trace_level = "debug"
//!
//! [render]
//! emphasis = "balanced"
//! ```
//!
//! or from a flat key/value map via [`Config::from_map`].
//!
//! # Examples
//!
//! ```rust
//! use notecase::app::{Event, Session};
//! use notecase::markup::RenderOptions;
//! use notecase::storage::MemoryStore;
//!
//! let mut session = Session::open(MemoryStore::new(), "notesApp", RenderOptions::default());
//! session.dispatch(&Event::CreateFolder { name: "Recipes".into() })?;
//! session.dispatch(&Event::CreateNote { name: "Bread".into() })?;
//!
//! let preview = session.state().preview().unwrap();
//! assert!(preview.starts_with("<h1>Bread</h1>"));
//! # Ok::<(), notecase::NotecaseError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod markup;
pub mod observability;
pub mod storage;

pub use app::{handle_event, Action, AppState, Dispatch, Event, Session};
pub use domain::{NotecaseError, Result};

use crate::markup::{EmphasisMatching, RenderOptions};
use crate::storage::{FileStore, DEFAULT_STORAGE_KEY};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// data_dir = "~/notes"
/// storage_key = "notesApp"
/// trace_level = "debug"
///
/// [render]
/// emphasis = "greedy"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for the snapshot and the log file.
    ///
    /// A leading `~` is expanded. Default: `NOTECASE_DATA_DIR`, else
    /// `~/.local/share/notecase`.
    pub data_dir: Option<PathBuf>,

    /// Key the snapshot is stored under. Default: `"notesApp"`
    pub storage_key: String,

    /// Tracing level or filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Markup rendering options.
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            trace_level: None,
            render: RenderOptions::default(),
        }
    }
}

impl Config {
    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::Io`] if the file cannot be read and
    /// [`NotecaseError::Config`] if it is not valid configuration.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| NotecaseError::Config(format!("{}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration from a flat key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - `data_dir`: path (empty values ignored)
    /// - `storage_key`: string (empty values ignored)
    /// - `trace_level`: string
    /// - `emphasis`: `greedy` or `balanced` (falls back to `greedy`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notecase::Config;
    /// use notecase::markup::EmphasisMatching;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("storage_key".to_string(), "work-notes".to_string());
    /// map.insert("emphasis".to_string(), "balanced".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.storage_key, "work-notes");
    /// assert_eq!(config.render.emphasis, EmphasisMatching::Balanced);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        let emphasis = non_empty("emphasis").map_or_else(EmphasisMatching::default, |value| {
            value.parse().unwrap_or_else(|e| {
                tracing::debug!(error = %e, "invalid emphasis setting, using default");
                EmphasisMatching::default()
            })
        });

        Self {
            data_dir: non_empty("data_dir").map(PathBuf::from),
            storage_key: non_empty("storage_key")
                .map_or_else(|| DEFAULT_STORAGE_KEY.to_string(), String::from),
            trace_level: non_empty("trace_level").map(String::from),
            render: RenderOptions { emphasis },
        }
    }

    /// The data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(
            infrastructure::default_data_dir,
            infrastructure::expand_tilde,
        )
    }
}

/// Initializes logging and opens a file-backed session.
///
/// # Side Effects
///
/// - Initializes the tracing subscriber (log file in the data directory)
/// - Creates the data directory if it doesn't exist
/// - Loads the stored snapshot, or the default tree
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
///
/// # Example
///
/// ```rust,no_run
/// use notecase::{initialize, Config};
///
/// let session = initialize(&Config::default())?;
/// println!("{}", session.state().sidebar().header.title);
/// # Ok::<(), notecase::NotecaseError>(())
/// ```
pub fn initialize(config: &Config) -> Result<Session<FileStore>> {
    observability::init_tracing(config);
    tracing::debug!("initializing notecase");

    let store = FileStore::new(config.resolved_data_dir())?;
    Ok(Session::open(store, config.storage_key.clone(), config.render))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_map_falls_back_on_bad_values() {
        let mut map = BTreeMap::new();
        map.insert("emphasis".to_string(), "sideways".to_string());
        map.insert("storage_key".to_string(), "  ".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("notecase.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/notes\"\ntrace_level = \"debug\"\n\n[render]\nemphasis = \"balanced\"\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/notes")));
        assert_eq!(config.storage_key, "notesApp");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.render, RenderOptions::balanced());
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/srv/notes"));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "storage_key = [").unwrap();

        assert!(matches!(Config::from_file(&path), Err(NotecaseError::Config(_))));
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.toml")),
            Err(NotecaseError::Io(_))
        ));
    }
}
