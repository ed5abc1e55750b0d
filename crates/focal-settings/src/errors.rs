//! Settings errors.

use std::path::PathBuf;

/// Errors from writing the persisted settings file.
///
/// Reads never error (missing or malformed files fall back to defaults);
/// only saving can fail, and that failure is surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The data directory could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir {
        /// Directory we tried to create.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File we tried to write.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
