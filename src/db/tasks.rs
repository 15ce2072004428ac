//! Task store backed by SQLite.
//!
//! Enum and date columns are stored as text and parsed leniently on the way
//! out, so rows written by older versions (or edited by hand) still load.

use super::db::Db;
use super::store::{patched, prepare_new, StoreError, StoreResult, TaskStore};
use super::tags::Tags;
use crate::libs::task::{self, Priority, Status, Task, TaskPatch, DATE_FORMAT, TIMESTAMP_FORMAT};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const TASK_COLUMNS: &str = "id, title, description, priority, status, due_date, assigned_to, recurring, recurring_pattern, created_at, updated_at, completed_at";
const INSERT_TASK: &str = "INSERT INTO tasks (id, title, description, priority, status, due_date, assigned_to, recurring, recurring_pattern, created_at, updated_at, completed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, priority = ?4, status = ?5, due_date = ?6, assigned_to = ?7,
    recurring = ?8, recurring_pattern = ?9, created_at = ?10, updated_at = ?11, completed_at = ?12 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const TASK_EXISTS: &str = "SELECT 1 FROM tasks WHERE id = ?1";

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    /// Store in the application data directory.
    pub fn new() -> Result<Tasks> {
        Ok(Tasks { conn: Db::new()?.conn })
    }

    pub fn open(path: &Path) -> Result<Tasks> {
        Ok(Tasks { conn: Db::open(path)?.conn })
    }

    pub fn in_memory() -> Result<Tasks> {
        Ok(Tasks { conn: Db::in_memory()?.conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn select(&self, filter: &str) -> String {
        format!("SELECT {} FROM tasks {} ORDER BY rowid", TASK_COLUMNS, filter)
    }

    fn write(conn: &Connection, sql: &str, task: &Task) -> rusqlite::Result<usize> {
        conn.execute(
            sql,
            params![
                task.id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.status.as_str(),
                task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                task.assigned_to,
                task.recurring,
                task.recurring_pattern.map(|p| p.as_str()),
                format_timestamp(task.created_at),
                format_timestamp(task.updated_at),
                format_timestamp(task.completed_at),
            ],
        )
    }
}

fn format_timestamp(ts: Option<NaiveDateTime>) -> Option<String> {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Reads any column as text; blobs and NULLs are absent.
fn column_text(row: &Row, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    })
}

fn parse_row(row: &Row) -> rusqlite::Result<Task> {
    let date = |idx| -> rusqlite::Result<Option<NaiveDate>> { Ok(column_text(row, idx)?.and_then(|d| task::parse_date(&d))) };
    let timestamp = |idx| -> rusqlite::Result<Option<NaiveDateTime>> { Ok(column_text(row, idx)?.and_then(|t| task::parse_timestamp(&t))) };

    let recurring = column_text(row, 7)?.is_some_and(|r| task::flag_from_text(&r));
    let recurring_pattern = if recurring {
        column_text(row, 8)?.and_then(|p| p.parse().ok())
    } else {
        None
    };

    Ok(Task {
        id: column_text(row, 0)?.unwrap_or_default(),
        title: column_text(row, 1)?.unwrap_or_default(),
        description: column_text(row, 2)?.unwrap_or_default(),
        priority: column_text(row, 3)?.map(|p| Priority::from_lenient(&p)).unwrap_or_default(),
        status: column_text(row, 4)?.map(|s| Status::from_lenient(&s)).unwrap_or_default(),
        due_date: date(5)?,
        tags: Vec::new(),
        assigned_to: column_text(row, 6)?.filter(|a| !a.trim().is_empty()),
        recurring,
        recurring_pattern,
        created_at: timestamp(9)?,
        updated_at: timestamp(10)?,
        completed_at: timestamp(11)?,
    })
}

impl TaskStore for Tasks {
    fn get_all(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&self.select(""))?;
        let mut tasks = stmt.query_map([], parse_row)?.collect::<rusqlite::Result<Vec<Task>>>()?;

        let mut tags = Tags::new(&self.conn).all_task_tags()?;
        for task in &mut tasks {
            task.tags = tags.remove(&task.id).unwrap_or_default();
        }
        tracing::debug!(count = tasks.len(), "loaded tasks from database");
        Ok(tasks)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Task>> {
        let task = self.conn.query_row(&self.select("WHERE id = ?1"), params![id], parse_row).optional()?;
        match task {
            Some(mut task) => {
                task.tags = Tags::new(&self.conn).get_task_tags(&task.id)?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    fn add(&mut self, task: Task) -> StoreResult<()> {
        let task = prepare_new(task)?;
        let tx = self.conn.transaction()?;

        if tx.query_row(TASK_EXISTS, params![task.id], |_| Ok(())).optional()?.is_some() {
            return Err(StoreError::DuplicateId(task.id));
        }
        Self::write(&tx, INSERT_TASK, &task)?;
        Tags::new(&tx).set_task_tags(&task.id, &task.tags)?;
        tx.commit()?;

        tracing::debug!(id = %task.id, "inserted task");
        Ok(())
    }

    fn update(&mut self, id: &str, patch: &TaskPatch) -> StoreResult<bool> {
        let Some(current) = self.get(id)? else {
            return Ok(false);
        };
        let updated = patched(&current, patch)?;

        let tx = self.conn.transaction()?;
        Self::write(&tx, UPDATE_TASK, &updated)?;
        if patch.tags.is_some() {
            let tags = Tags::new(&tx);
            tags.set_task_tags(id, &updated.tags)?;
            tags.prune_unused()?;
        }
        tx.commit()?;

        tracing::debug!(%id, "updated task");
        Ok(true)
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let tx = self.conn.transaction()?;
        let affected = tx.execute(DELETE_TASK, params![id])?;
        if affected > 0 {
            Tags::new(&tx).prune_unused()?;
        }
        tx.commit()?;

        tracing::debug!(%id, deleted = affected > 0, "deleted task");
        Ok(affected > 0)
    }
}
