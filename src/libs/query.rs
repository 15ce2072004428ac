//! Read-only views over a snapshot of tasks.
//!
//! Every function here is pure: it takes the tasks it works on, performs no
//! I/O and never fails. Malformed records have already been normalized by the
//! store, so the worst case for a task is simply "undated" or "untagged".
//!
//! ## Usage
//!
//! ```rust
//! use taskdesk::libs::query::{self, SortKey};
//! use taskdesk::libs::task::Task;
//!
//! let tasks = vec![Task::new("Write docs", ""), Task::new("Fix bug", "parser")];
//! let found = query::filter(&tasks, Some("BUG"), None);
//! assert_eq!(found.len(), 1);
//!
//! let sorted = query::sort(tasks.clone(), SortKey::DueDate);
//! let stats = query::statistics_today(&sorted);
//! assert_eq!(stats.total_tasks, 2);
//! ```

use super::task::{now, Priority, Status, Task};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tasks due within this many days from today (inclusive) count as due soon.
pub const DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Priority,
    DueDate,
    Status,
}

/// Request-scoped list parameters.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: SortKey,
    pub show_completed: bool,
}

/// Keeps tasks whose title or description contains `search_query`
/// (case-insensitive) and whose tags contain `filter_tag` (exact match).
/// Empty or missing criteria do not constrain the result.
pub fn filter(tasks: &[Task], search_query: Option<&str>, filter_tag: Option<&str>) -> Vec<Task> {
    let needle = search_query.filter(|q| !q.is_empty()).map(str::to_lowercase);
    let tag = filter_tag.filter(|t| !t.is_empty());

    tasks
        .iter()
        .filter(|task| match &needle {
            Some(needle) => task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle),
            None => true,
        })
        .filter(|task| tag.map_or(true, |tag| task.has_tag(tag)))
        .cloned()
        .collect()
}

/// Orders tasks by `key`. The sort is stable: ties keep their input order,
/// and undated tasks go after every dated one.
pub fn sort(mut tasks: Vec<Task>, key: SortKey) -> Vec<Task> {
    match key {
        SortKey::Priority => tasks.sort_by_key(|t| t.priority),
        SortKey::Status => tasks.sort_by_key(|t| t.status),
        SortKey::DueDate => tasks.sort_by_key(|t| t.due_date.unwrap_or(NaiveDate::MAX)),
    }
    tasks
}

/// Filter, optionally hide completed tasks, then sort.
pub fn query(tasks: &[Task], params: &TaskQuery) -> Vec<Task> {
    let mut found = filter(tasks, params.search.as_deref(), params.tag.as_deref());
    if !params.show_completed {
        found.retain(|t| !t.is_completed());
    }
    sort(found, params.sort)
}

/// Splits tasks into (active, completed), preserving order within each group.
pub fn partition_completed(tasks: Vec<Task>) -> (Vec<Task>, Vec<Task>) {
    tasks.into_iter().partition(|t| !t.is_completed())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "Not Started")]
    pub not_started: usize,
    #[serde(rename = "In Progress")]
    pub in_progress: usize,
    #[serde(rename = "Completed")]
    pub completed: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::NotStarted => self.not_started,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
        }
    }

    fn increment(&mut self, status: Status) {
        match status {
            Status::NotStarted => self.not_started += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.not_started + self.in_progress + self.completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    fn increment(&mut self, priority: Priority) {
        match priority {
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Aggregate report over a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    pub total_tasks: usize,
    pub status_counts: StatusCounts,
    pub priority_counts: PriorityCounts,
    pub overdue_count: usize,
    pub due_soon_count: usize,
}

/// Counts tasks by status and priority, and classifies open tasks by due date
/// relative to `today`.
///
/// A task due today is due soon, not overdue. Completed and undated tasks
/// are never overdue or due soon.
pub fn statistics(tasks: &[Task], today: NaiveDate) -> TaskStatistics {
    let due_soon_limit = today + Duration::days(DUE_SOON_DAYS);
    let mut stats = TaskStatistics {
        total_tasks: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        stats.status_counts.increment(task.status);
        stats.priority_counts.increment(task.priority);

        if task.is_completed() {
            continue;
        }
        if let Some(due) = task.due_date {
            if due < today {
                stats.overdue_count += 1;
            } else if due <= due_soon_limit {
                stats.due_soon_count += 1;
            }
        }
    }

    stats
}

/// [`statistics`] evaluated against the local current date.
pub fn statistics_today(tasks: &[Task]) -> TaskStatistics {
    statistics(tasks, now().date())
}

/// Every distinct tag across all tasks, in lexicographic order.
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .flat_map(|t| t.tags.iter())
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of tasks carrying each tag.
pub fn tag_counts(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        for tag in &task.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Completed share of all tasks as a whole percentage (truncated).
pub fn completion_rate(stats: &TaskStatistics) -> u32 {
    if stats.total_tasks == 0 {
        return 0;
    }
    (stats.status_counts.completed * 100 / stats.total_tasks) as u32
}

/// Number of tasks created per calendar day. Tasks without a creation time are skipped.
pub fn created_per_day(tasks: &[Task]) -> BTreeMap<NaiveDate, usize> {
    let mut per_day = BTreeMap::new();
    for created in tasks.iter().filter_map(|t| t.created_at) {
        *per_day.entry(created.date()).or_insert(0) += 1;
    }
    per_day
}
