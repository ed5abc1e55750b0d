//! Append-only AI output log.

use focal_core::{ids, time};
use rusqlite::params;

use crate::errors::StoreError;
use crate::models::{AiKind, TaskAiRecord};
use crate::store::Store;

impl Store {
    /// Append an AI output record for a task.
    #[tracing::instrument(skip(self, content), fields(kind = kind.as_str()))]
    pub fn add_task_ai(
        &self,
        task_id: &str,
        provider: &str,
        kind: AiKind,
        content: &str,
    ) -> Result<TaskAiRecord, StoreError> {
        let record = TaskAiRecord {
            id: ids::new_id(),
            task_id: task_id.to_string(),
            created_at: time::now_utc(),
            provider: provider.to_string(),
            kind,
            content: content.to_string(),
        };
        let conn = self.conn()?;
        let _ = conn.execute(
            "INSERT INTO task_ai (id, task_id, created_at, provider, kind, content) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.task_id,
                time::to_rfc3339(record.created_at),
                record.provider,
                record.kind.as_str(),
                record.content
            ],
        )?;
        Ok(record)
    }

    /// List AI records for a task, newest first, optionally filtered by kind.
    pub fn list_task_ai(
        &self,
        task_id: &str,
        kind: Option<AiKind>,
        limit: usize,
    ) -> Result<Vec<TaskAiRecord>, StoreError> {
        let conn = self.conn()?;
        let mut out = Vec::new();

        let collect = |raw: (String, String, String, String, String, String),
                       out: &mut Vec<TaskAiRecord>|
         -> Result<(), StoreError> {
            let (id, task_id, created_raw, provider, kind_raw, content) = raw;
            let created_at = time::from_rfc3339(&created_raw)
                .ok_or_else(|| StoreError::InvalidTimestamp(created_raw.clone()))?;
            let kind =
                AiKind::parse(&kind_raw).ok_or_else(|| StoreError::InvalidKind(kind_raw.clone()))?;
            out.push(TaskAiRecord {
                id,
                task_id,
                created_at,
                provider,
                kind,
                content,
            });
            Ok(())
        };

        if let Some(kind) = kind {
            let mut stmt = conn.prepare(
                "SELECT id, task_id, created_at, provider, kind, content FROM task_ai \
                 WHERE task_id = ?1 AND kind = ?2 ORDER BY created_at DESC LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![task_id, kind.as_str(), limit as i64], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?;
            for row in rows {
                collect(row?, &mut out)?;
            }
        } else {
            let mut stmt = conn.prepare(
                "SELECT id, task_id, created_at, provider, kind, content FROM task_ai \
                 WHERE task_id = ?1 ORDER BY created_at DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![task_id, limit as i64], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })?;
            for row in rows {
                collect(row?, &mut out)?;
            }
        }
        Ok(out)
    }
}
