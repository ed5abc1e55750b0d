//! Integration credential rows.
//!
//! One opaque data blob per (email, provider); writing again overwrites
//! the blob in place.

use focal_core::{ids, time};
use rusqlite::params;

use crate::errors::StoreError;
use crate::models::IntegrationKey;
use crate::store::Store;

impl Store {
    /// Insert or overwrite the credential blob for a key.
    #[tracing::instrument(skip(self, data), fields(provider = %key.provider))]
    pub fn upsert_integration(&self, key: &IntegrationKey, data: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let _ = conn.execute(
            "INSERT INTO integrations (id, user_email, provider, created_at, data) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(user_email, provider) DO UPDATE SET data = excluded.data",
            params![
                ids::new_id(),
                key.user_email,
                key.provider,
                time::to_rfc3339(time::now_utc()),
                data
            ],
        )?;
        Ok(())
    }

    /// Fetch the credential blob for a key, if stored.
    pub fn get_integration(&self, key: &IntegrationKey) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT data FROM integrations WHERE user_email = ?1 AND provider = ?2")?;
        let mut rows = stmt.query(params![key.user_email, key.provider])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Remove the credential for a key, returning how many rows were removed.
    #[tracing::instrument(skip(self), fields(provider = %key.provider))]
    pub fn delete_integration(&self, key: &IntegrationKey) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute(
            "DELETE FROM integrations WHERE user_email = ?1 AND provider = ?2",
            params![key.user_email, key.provider],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("tasks.sqlite3")).unwrap();
        (dir, store)
    }

    #[test]
    fn upsert_overwrites_existing_blob() {
        let (_dir, store) = test_store();
        let key = IntegrationKey::new("user@example.com", "google_drive");

        store.upsert_integration(&key, "first").unwrap();
        store.upsert_integration(&key, "second").unwrap();

        assert_eq!(
            store.get_integration(&key).unwrap().as_deref(),
            Some("second")
        );
    }

    #[test]
    fn lookup_uses_normalized_email() {
        let (_dir, store) = test_store();
        store
            .upsert_integration(&IntegrationKey::new("User@Example.com", "google_drive"), "x")
            .unwrap();
        let found = store
            .get_integration(&IntegrationKey::new("user@example.com", "google_drive"))
            .unwrap();
        assert_eq!(found.as_deref(), Some("x"));
    }

    #[test]
    fn delete_reports_count() {
        let (_dir, store) = test_store();
        let key = IntegrationKey::new("user@example.com", "google_drive");
        store.upsert_integration(&key, "x").unwrap();

        assert_eq!(store.delete_integration(&key).unwrap(), 1);
        assert_eq!(store.delete_integration(&key).unwrap(), 0);
        assert!(store.get_integration(&key).unwrap().is_none());
    }
}
