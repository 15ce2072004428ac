//! Persistence layer.
//!
//! Tasks live behind the [`TaskStore`](store::TaskStore) trait with two
//! backends:
//!
//! - [`json_file::JsonTasks`]: a single human-editable `tasks.json`
//! - [`tasks::Tasks`]: SQLite with versioned migrations and a tag table
//!
//! [`open_store`] picks one from the configuration.
//!
//! ```rust,no_run
//! use taskdesk::db::open_store;
//! use taskdesk::libs::config::Config;
//! use taskdesk::libs::task::Task;
//!
//! let config = Config::read().unwrap();
//! let mut store = open_store(&config.storage).unwrap();
//! store.add(Task::new("Review code", "Check PR #123")).unwrap();
//! ```

/// SQLite connection setup.
pub mod db;

/// Schema versioning for the SQLite backend.
pub mod migrations;

/// JSON file backend.
pub mod json_file;

/// The storage contract and its error type.
pub mod store;

/// Tag table and task/tag junction for the SQLite backend.
pub mod tags;

/// SQLite backend.
pub mod tasks;

use crate::libs::config::{StorageBackend, StorageConfig};
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use json_file::JsonTasks;
use store::TaskStore;
use tasks::Tasks;

/// Opens the backend selected in `config`.
///
/// Without an explicit path the store file lives in the data directory
/// (`tasks.json` or `taskdesk.db`).
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn TaskStore>> {
    let path = match &config.path {
        Some(path) => path.clone(),
        None => {
            let file_name = match config.backend {
                StorageBackend::Json => json_file::TASKS_FILE_NAME,
                StorageBackend::Sqlite => db::DB_FILE_NAME,
            };
            DataStorage::new().get_path(file_name)?
        }
    };
    msg_debug!(Message::StoreOpened(config.backend.to_string(), path.display().to_string()));

    let store: Box<dyn TaskStore> = match config.backend {
        StorageBackend::Json => Box::new(JsonTasks::open(path)),
        StorageBackend::Sqlite => Box::new(Tasks::open(&path)?),
    };
    Ok(store)
}
