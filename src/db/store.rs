//! Persistence contract shared by the JSON and SQLite backends.

use crate::libs::task::{now, Task, TaskPatch, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("task file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("a task with ID '{0}' already exists")]
    DuplicateId(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A durable collection of tasks keyed by ID.
///
/// Reads never fail because of a malformed field: records are normalized into
/// strictly typed [`Task`] values. Only the medium itself (missing
/// permissions, corrupt file, broken database) produces a [`StoreError`].
pub trait TaskStore {
    /// All tasks in insertion order.
    fn get_all(&self) -> StoreResult<Vec<Task>>;

    fn get(&self, id: &str) -> StoreResult<Option<Task>>;

    /// Persists a new task. Fails with [`StoreError::DuplicateId`] if the ID is taken.
    fn add(&mut self, task: Task) -> StoreResult<()>;

    /// Applies `patch` to the task with `id`. Returns `false` if there is no such task.
    fn update(&mut self, id: &str, patch: &TaskPatch) -> StoreResult<bool>;

    /// Returns `false` if there is no such task.
    fn delete(&mut self, id: &str) -> StoreResult<bool>;

    /// Adds every task whose ID is not taken yet, returning how many were added.
    ///
    /// Tasks that fail validation or collide with an existing ID are skipped.
    fn import(&mut self, tasks: Vec<Task>) -> StoreResult<usize> {
        let mut imported = 0;
        for task in tasks {
            match self.add(task) {
                Ok(()) => imported += 1,
                Err(StoreError::DuplicateId(id)) => tracing::debug!(%id, "import skipped existing task"),
                Err(StoreError::Validation(e)) => tracing::debug!(error = %e, "import skipped invalid task"),
                Err(e) => return Err(e),
            }
        }
        Ok(imported)
    }
}

/// Prepares a task for insertion: normalizes it, fills missing timestamps and validates.
pub(crate) fn prepare_new(mut task: Task) -> StoreResult<Task> {
    task.normalize();
    if task.id.trim().is_empty() {
        task.id = uuid::Uuid::new_v4().to_string();
    }
    let stamp = now();
    task.created_at.get_or_insert(stamp);
    if task.updated_at.is_none() {
        task.updated_at = task.created_at;
    }
    if task.is_completed() && task.completed_at.is_none() {
        task.completed_at = task.updated_at;
    }
    task.validate()?;
    Ok(task)
}

/// Returns the task with `patch` applied and validated, leaving `task` untouched on error.
pub(crate) fn patched(task: &Task, patch: &TaskPatch) -> StoreResult<Task> {
    let mut updated = task.clone();
    updated.apply(patch, now());
    updated.validate()?;
    Ok(updated)
}
