//! Store handle.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::errors::StoreError;
use crate::schema::init_schema;

/// Handle on the dashboard database.
///
/// Holds only the path; each operation opens a fresh connection with
/// foreign keys enabled and closes it when done.
#[derive(Clone, Debug)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Create a handle and initialize the schema, creating the parent
    /// directory if needed.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        init_schema(&store.conn()?)?;
        Ok(store)
    }

    /// Database path this handle points at.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection for one operation.
    pub(crate) fn conn(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }
}
