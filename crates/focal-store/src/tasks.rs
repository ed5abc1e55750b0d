//! Task CRUD.

use chrono::{DateTime, Utc};
use focal_core::{ids, time};
use rusqlite::{Row, params};

use crate::errors::StoreError;
use crate::models::Task;
use crate::store::Store;

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    time::from_rfc3339(raw).ok_or_else(|| StoreError::InvalidTimestamp(raw.to_string()))
}

fn task_from_row(row: &Row<'_>) -> Result<Task, StoreError> {
    let created_raw: String = row.get(2)?;
    let completed_raw: Option<String> = row.get(3)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: parse_timestamp(&created_raw)?,
        completed_at: completed_raw.as_deref().map(parse_timestamp).transpose()?,
    })
}

impl Store {
    /// Insert a new open task with a trimmed title.
    #[tracing::instrument(skip(self))]
    pub fn add_task(&self, title: &str) -> Result<Task, StoreError> {
        let task = Task {
            id: ids::new_id(),
            title: title.trim().to_string(),
            created_at: time::now_utc(),
            completed_at: None,
        };
        let conn = self.conn()?;
        let _ = conn.execute(
            "INSERT INTO tasks (id, title, created_at, completed_at) VALUES (?1, ?2, ?3, NULL)",
            params![task.id, task.title, time::to_rfc3339(task.created_at)],
        )?;
        Ok(task)
    }

    /// List tasks newest-first, optionally hiding completed ones.
    pub fn list_tasks(&self, include_completed: bool) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn()?;
        let sql = if include_completed {
            "SELECT id, title, created_at, completed_at FROM tasks ORDER BY created_at DESC"
        } else {
            "SELECT id, title, created_at, completed_at FROM tasks \
             WHERE completed_at IS NULL ORDER BY created_at DESC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, title, created_raw, completed_raw) = row?;
            tasks.push(Task {
                id,
                title,
                created_at: parse_timestamp(&created_raw)?,
                completed_at: completed_raw.as_deref().map(parse_timestamp).transpose()?,
            });
        }
        Ok(tasks)
    }

    /// Fetch one task by id.
    pub fn get_task(&self, task_id: &str) -> Result<Option<Task>, StoreError> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, title, created_at, completed_at FROM tasks WHERE id = ?1")?;
        let mut rows = stmt.query(params![task_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(task_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Set or clear a task's completion timestamp.
    #[tracing::instrument(skip(self))]
    pub fn set_task_completed(&self, task_id: &str, completed: bool) -> Result<(), StoreError> {
        let completed_at = completed.then(|| time::to_rfc3339(time::now_utc()));
        let conn = self.conn()?;
        let _ = conn.execute(
            "UPDATE tasks SET completed_at = ?1 WHERE id = ?2",
            params![completed_at, task_id],
        )?;
        Ok(())
    }

    /// Delete the given tasks, returning how many rows were removed.
    ///
    /// An empty id set is a no-op returning 0.
    #[tracing::instrument(skip(self, task_ids))]
    pub fn delete_tasks(&self, task_ids: &[String]) -> Result<usize, StoreError> {
        if task_ids.is_empty() {
            return Ok(0);
        }
        let placeholders = vec!["?"; task_ids.len()].join(",");
        let sql = format!("DELETE FROM tasks WHERE id IN ({placeholders})");
        let conn = self.conn()?;
        let removed = conn.execute(&sql, rusqlite::params_from_iter(task_ids.iter()))?;
        Ok(removed)
    }
}
