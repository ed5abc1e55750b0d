//! Environment-derived paths.

use std::path::{Path, PathBuf};

/// Environment variable naming the default search root.
const ROOT_VAR: &str = "FOCAL_ROOT";

/// Environment variable overriding the data directory.
const DATA_DIR_VAR: &str = "FOCAL_DATA_DIR";

/// Database file name inside the data directory.
const DB_FILE: &str = "tasks.sqlite3";

/// Resolved filesystem configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Default root directory for file search.
    pub root_dir: PathBuf,
    /// Directory holding the database and persisted settings.
    pub data_dir: PathBuf,
    /// SQLite database path.
    pub db_path: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// `FOCAL_ROOT` defaults to the current working directory;
    /// `FOCAL_DATA_DIR` defaults to `.local` beneath it. The database
    /// lives at `<data_dir>/tasks.sqlite3`.
    #[must_use]
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let root_dir = std::env::var(ROOT_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| cwd.clone(), |v| expand_home(v.trim()));
        let data_dir = std::env::var(DATA_DIR_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| cwd.join(".local"), |v| expand_home(v.trim()));
        let db_path = data_dir.join(DB_FILE);
        Self {
            root_dir,
            data_dir,
            db_path,
        }
    }

    /// Build a configuration rooted at an explicit directory (CLI override).
    #[must_use]
    pub fn with_root(mut self, root: &Path) -> Self {
        self.root_dir = root.to_path_buf();
        self
    }

    /// Override the database path (CLI override).
    #[must_use]
    pub fn with_db_path(mut self, db_path: &Path) -> Self {
        self.db_path = db_path.to_path_buf();
        self
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
