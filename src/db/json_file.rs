//! Task store backed by a single JSON file.
//!
//! The file holds one object mapping task IDs to task records:
//!
//! ```json
//! {
//!   "0b6f…": { "id": "0b6f…", "title": "Write report", "status": "In Progress", … }
//! }
//! ```
//!
//! Key order is insertion order. A missing file is an empty store; every
//! write replaces the file atomically through a sibling `*.tmp` file.

use super::store::{patched, prepare_new, StoreError, StoreResult, TaskStore};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskPatch};
use crate::msg_warning;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const TASKS_FILE_NAME: &str = "tasks.json";

#[derive(Debug)]
pub struct JsonTasks {
    path: PathBuf,
}

impl JsonTasks {
    /// Store in the application data directory.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::open(DataStorage::new().get_path(TASKS_FILE_NAME)?))
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut tasks = parse_tasks(&fs::read_to_string(&self.path)?)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");

        // Fresh IDs are written back at once so later reads see the same ones.
        let rekeyed = assign_unique_ids(&mut tasks);
        if rekeyed > 0 {
            tracing::debug!(path = %self.path.display(), rekeyed, "assigned fresh task IDs");
            self.save(&tasks)?;
        }
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let mut records = Map::with_capacity(tasks.len());
        for task in tasks {
            records.insert(task.id.clone(), serde_json::to_value(task)?);
        }
        let content = serde_json::to_string_pretty(&Value::Object(records))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Reads tasks from JSON text: either an `{id: task}` object or an array of tasks.
///
/// For the object form the map key is the task ID, whatever the record says.
/// Entries that are not objects are skipped with a warning.
pub fn parse_tasks(content: &str) -> StoreResult<Vec<Task>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<(Option<String>, Value)> = match serde_json::from_str::<Value>(content)? {
        Value::Object(records) => records.into_iter().map(|(key, record)| (Some(key), record)).collect(),
        Value::Array(records) => records.into_iter().map(|record| (None, record)).collect(),
        _ => return Err(StoreError::Json(serde::de::Error::custom("expected an object of tasks or an array of tasks"))),
    };

    let mut tasks = Vec::with_capacity(entries.len());
    for (position, (key, record)) in entries.into_iter().enumerate() {
        if !record.is_object() {
            msg_warning!(Message::MalformedRecordSkipped(key.unwrap_or_else(|| format!("#{}", position))));
            continue;
        }
        let mut task: Task = serde_json::from_value(record)?;
        if let Some(key) = key {
            task.id = key;
        }
        tasks.push(task);
    }
    Ok(tasks)
}

/// Gives every task without an ID, or with an ID already used by an earlier
/// task, a fresh one. Returns how many tasks were re-keyed.
fn assign_unique_ids(tasks: &mut [Task]) -> usize {
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut rekeyed = 0;
    for task in tasks.iter_mut() {
        if task.id.trim().is_empty() || seen.contains(&task.id) {
            task.id = Uuid::new_v4().to_string();
            rekeyed += 1;
        }
        seen.insert(task.id.clone());
    }
    rekeyed
}

impl TaskStore for JsonTasks {
    fn get_all(&self) -> StoreResult<Vec<Task>> {
        self.load()
    }

    fn get(&self, id: &str) -> StoreResult<Option<Task>> {
        Ok(self.load()?.into_iter().find(|t| t.id == id))
    }

    fn add(&mut self, task: Task) -> StoreResult<()> {
        let task = prepare_new(task)?;
        let mut tasks = self.load()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        tasks.push(task);
        self.save(&tasks)
    }

    fn update(&mut self, id: &str, patch: &TaskPatch) -> StoreResult<bool> {
        let mut tasks = self.load()?;
        let Some(slot) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        *slot = patched(slot, patch)?;
        self.save(&tasks)?;
        Ok(true)
    }

    fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        self.save(&tasks)?;
        Ok(true)
    }

    /// Loads and writes the file once for the whole batch.
    fn import(&mut self, incoming: Vec<Task>) -> StoreResult<usize> {
        let mut tasks = self.load()?;
        let mut imported = 0;
        for task in incoming {
            let task = match prepare_new(task) {
                Ok(task) => task,
                Err(StoreError::Validation(e)) => {
                    tracing::debug!(error = %e, "import skipped invalid task");
                    continue;
                }
                Err(e) => return Err(e),
            };
            if tasks.iter().any(|t| t.id == task.id) {
                tracing::debug!(id = %task.id, "import skipped existing task");
                continue;
            }
            tasks.push(task);
            imported += 1;
        }
        if imported > 0 {
            self.save(&tasks)?;
        }
        Ok(imported)
    }
}
