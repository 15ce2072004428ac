//! Core building blocks shared by the commands.
//!
//! ```rust
//! use taskdesk::libs::query::{self, SortKey};
//! use taskdesk::libs::task::{Priority, Task};
//!
//! let mut urgent = Task::new("Fix outage", "");
//! urgent.priority = Priority::High;
//! let tasks = vec![Task::new("Tidy desk", ""), urgent];
//!
//! let sorted = query::sort(tasks, SortKey::Priority);
//! assert_eq!(sorted[0].title, "Fix outage");
//! ```

pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod query;
pub mod secret;
pub mod task;
pub mod view;
