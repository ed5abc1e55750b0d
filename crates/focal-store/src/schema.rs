//! Schema creation.

use rusqlite::Connection;

use crate::errors::StoreError;

/// Create all tables if they do not exist.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tasks (
           id TEXT PRIMARY KEY,
           title TEXT NOT NULL,
           created_at TEXT NOT NULL,
           completed_at TEXT
         );
         CREATE TABLE IF NOT EXISTS task_ai (
           id TEXT PRIMARY KEY,
           task_id TEXT NOT NULL,
           created_at TEXT NOT NULL,
           provider TEXT NOT NULL,
           kind TEXT NOT NULL,
           content TEXT NOT NULL,
           FOREIGN KEY(task_id) REFERENCES tasks(id) ON DELETE CASCADE
         );
         CREATE TABLE IF NOT EXISTS integrations (
           id TEXT PRIMARY KEY,
           user_email TEXT NOT NULL,
           provider TEXT NOT NULL,
           created_at TEXT NOT NULL,
           data TEXT NOT NULL,
           UNIQUE(user_email, provider)
         );",
    )?;
    Ok(())
}
