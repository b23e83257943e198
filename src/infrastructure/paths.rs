//! Path utilities for locating notecase's data directory.
//!
//! Resolution order for the data directory:
//! 1. `NOTECASE_DATA_DIR` environment variable
//! 2. `$HOME/.local/share/notecase`
//! 3. `.notecase` in the working directory, when no home directory is known

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "NOTECASE_DATA_DIR";

/// Returns the data directory from the process environment.
///
/// The JSON snapshot file `notesApp.json` and the log file `notecase.log` live
/// inside it.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        home_dir(),
    )
}

fn resolve_data_dir(override_dir: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
        return dir;
    }
    home.map_or_else(
        || PathBuf::from(".notecase"),
        |home| home.join(".local").join("share").join("notecase"),
    )
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use notecase::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    expand_tilde_with(path.as_ref(), home_dir().as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_home() {
        assert_eq!(
            resolve_data_dir(Some(PathBuf::from("/srv/notes")), Some(PathBuf::from("/home/u"))),
            PathBuf::from("/srv/notes")
        );
        assert_eq!(
            resolve_data_dir(Some(PathBuf::new()), Some(PathBuf::from("/home/u"))),
            PathBuf::from("/home/u/.local/share/notecase")
        );
        assert_eq!(resolve_data_dir(None, None), PathBuf::from(".notecase"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/u");
        assert_eq!(
            expand_tilde_with(Path::new("~/notes"), Some(home)),
            PathBuf::from("/home/u/notes")
        );
        assert_eq!(expand_tilde_with(Path::new("~"), Some(home)), PathBuf::from("/home/u"));
        assert_eq!(
            expand_tilde_with(Path::new("~other/x"), Some(home)),
            PathBuf::from("~other/x")
        );
        assert_eq!(
            expand_tilde_with(Path::new("~/x"), None),
            PathBuf::from("~/x")
        );
    }
}
