//! File-based storage backend.
//!
//! Every key maps to one human-readable JSON file in a directory. Writes go to a
//! temporary file first and are then renamed over the target, so a crash never
//! leaves a half-written value behind.
//!
//! # Layout
//!
//! ```text
//! <dir>/
//! ├── notesApp.json      ← value stored under "notesApp"
//! └── notecase.log       ← written by the tracing subscriber, not by this store
//! ```

use crate::domain::error::{NotecaseError, Result};
use crate::storage::backend::KeyValueStore;
use std::path::{Path, PathBuf};

/// Durable [`KeyValueStore`] writing one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use notecase::storage::FileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = FileStore::new(PathBuf::from("/tmp/notecase"))?;
    /// # Ok::<(), notecase::NotecaseError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing file storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds `key`.
    ///
    /// # Errors
    ///
    /// Returns [`NotecaseError::Storage`] for keys that are empty or would escape
    /// the store directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(NotecaseError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let _span = tracing::debug_span!("file_get", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!(len = bytes.len(), "loaded value");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        let _span = tracing::debug_span!("file_set", key = %key, len = bytes.len()).entered();

        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, bytes)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }
}
