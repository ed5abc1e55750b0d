//! Store errors.

/// Errors from the SQLite store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The database directory could not be created.
    #[error("failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),

    /// A stored timestamp did not parse as RFC 3339.
    #[error("corrupt timestamp in database: {0:?}")]
    InvalidTimestamp(String),

    /// A stored AI record kind was not recognized.
    #[error("unknown AI record kind in database: {0:?}")]
    InvalidKind(String),
}
