//! Task record and the normalization rules applied at the storage boundary.
//!
//! A [`Task`] is always strictly typed once it has been read. Whatever the
//! persisted form looks like (hand-edited JSON, old database rows), reading it
//! never fails per field:
//!
//! - unknown priority/status values fall back to `Medium` / `Not Started`
//! - tags may arrive as a list or as a comma-separated string
//! - dates and timestamps that do not parse are treated as absent
//!
//! Validation is only performed on the write path (see [`Task::validate`]).

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 100;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Folds a raw enum label into a comparable key: `"IN_PROGRESS"` -> `"in progress"`.
fn label_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['-', '_'], " ")
}

/// Task urgency. Declaration order is the sort order (most urgent first).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parses a stored label, falling back to [`Priority::Medium`].
    pub fn from_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority '{}'", s)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task progress. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Parses a stored label, falling back to [`Status::NotStarted`].
    pub fn from_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "not started" => Ok(Status::NotStarted),
            "in progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(format!("unknown status '{}'", s)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum RecurringPattern {
    Daily,
    Weekly,
    Monthly,
}

impl RecurringPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringPattern::Daily => "Daily",
            RecurringPattern::Weekly => "Weekly",
            RecurringPattern::Monthly => "Monthly",
        }
    }
}

impl FromStr for RecurringPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "daily" => Ok(RecurringPattern::Daily),
            "weekly" => Ok(RecurringPattern::Weekly),
            "monthly" => Ok(RecurringPattern::Monthly),
            _ => Err(format!("unknown recurring pattern '{}'", s)),
        }
    }
}

impl fmt::Display for RecurringPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-path validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Title must be {max} characters or less")]
    TitleTooLong { max: usize },
    #[error("Description must be {max} characters or less")]
    DescriptionTooLong { max: usize },
}

/// A single unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    #[serde(serialize_with = "serialize_date")]
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub assigned_to: Option<String>,
    pub recurring: bool,
    pub recurring_pattern: Option<RecurringPattern>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    /// Creates a task with a fresh ID, default priority/status and creation timestamps.
    pub fn new(title: &str, description: &str) -> Self {
        let now = now();
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            tags: Vec::new(),
            assigned_to: None,
            recurring: false,
            recurring_pattern: None,
            created_at: Some(now),
            updated_at: Some(now),
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.title.chars().count() > TITLE_MAX_LEN {
            return Err(ValidationError::TitleTooLong { max: TITLE_MAX_LEN });
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(ValidationError::DescriptionTooLong { max: DESCRIPTION_MAX_LEN });
        }
        Ok(())
    }

    /// Brings a freshly built or imported task in line with the record invariants.
    pub fn normalize(&mut self) {
        self.tags = normalize_tags(std::mem::take(&mut self.tags));
        if !self.recurring {
            self.recurring_pattern = None;
        }
        if self.assigned_to.as_deref().is_some_and(|a| a.trim().is_empty()) {
            self.assigned_to = None;
        }
        match (self.status, self.completed_at) {
            (Status::Completed, None) => self.completed_at = self.updated_at.or(self.created_at),
            (Status::Completed, Some(_)) => {}
            (_, _) => self.completed_at = None,
        }
    }

    /// Applies a partial update at time `now`.
    ///
    /// `created_at` is never touched. `completed_at` is stamped on every
    /// transition into `Completed` and cleared when the task leaves it.
    pub fn apply(&mut self, patch: &TaskPatch, now: NaiveDateTime) {
        let was_completed = self.is_completed();

        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = &patch.tags {
            self.tags = normalize_tags(tags.clone());
        }
        if let Some(assigned_to) = &patch.assigned_to {
            self.assigned_to = assigned_to.as_ref().map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
        }
        if let Some(recurring) = patch.recurring {
            self.recurring = recurring;
        }
        if let Some(pattern) = patch.recurring_pattern {
            self.recurring_pattern = pattern;
            if pattern.is_some() && patch.recurring.is_none() {
                self.recurring = true;
            }
        }
        if !self.recurring {
            self.recurring_pattern = None;
        }

        match (was_completed, self.is_completed()) {
            (false, true) => self.completed_at = Some(now),
            (true, false) => self.completed_at = None,
            _ => {}
        }

        self.updated_at = Some(now);
    }
}

/// Partial update of a [`Task`].
///
/// `None` leaves a field unchanged. Clearable fields use a nested option:
/// `Some(None)` clears, `Some(Some(v))` sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
    pub assigned_to: Option<Option<String>>,
    pub recurring: Option<bool>,
    pub recurring_pattern: Option<Option<RecurringPattern>>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        TaskPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }
}

/// Current local time truncated to whole seconds, matching the stored precision.
pub fn now() -> NaiveDateTime {
    truncate_seconds(Local::now().naive_local())
}

fn truncate_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// Splits a comma-separated tag string, trimming entries and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(',').map(str::to_string).collect())
}

/// Trims tags, drops empty entries and repeated ones (first occurrence wins).
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Parses an ISO `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parses `YYYY-MM-DD HH:MM:SS`, also accepting the `T`-separated ISO form.
/// Fractional seconds are dropped.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(truncate_seconds)
}

fn serialize_date<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

fn serialize_timestamp<S: Serializer>(ts: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(t) => serializer.serialize_str(&t.format(TIMESTAMP_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Loosely typed task as found on disk. Every field is optional and untyped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTask {
    id: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    priority: Option<Value>,
    status: Option<Value>,
    due_date: Option<Value>,
    tags: Option<Value>,
    assigned_to: Option<Value>,
    recurring: Option<Value>,
    recurring_pattern: Option<Value>,
    created_at: Option<Value>,
    updated_at: Option<Value>,
    completed_at: Option<Value>,
}

/// Renders scalar JSON values as text; anything else is treated as missing.
fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts a list of strings or a comma-separated string.
pub(crate) fn tags_from_value(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => normalize_tags(items.into_iter().filter_map(|v| value_text(Some(v))).collect()),
        Some(Value::String(s)) => split_tags(&s),
        _ => Vec::new(),
    }
}

/// Interprets booleans, numbers and common textual spellings as a flag.
pub(crate) fn flag_from_text(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "y")
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        let recurring = match raw.recurring {
            Some(Value::Bool(b)) => b,
            other => value_text(other).is_some_and(|s| flag_from_text(&s)),
        };

        let mut task = Task {
            id: value_text(raw.id).unwrap_or_default(),
            title: value_text(raw.title).unwrap_or_default(),
            description: value_text(raw.description).unwrap_or_default(),
            priority: value_text(raw.priority).map(|p| Priority::from_lenient(&p)).unwrap_or_default(),
            status: value_text(raw.status).map(|s| Status::from_lenient(&s)).unwrap_or_default(),
            due_date: value_text(raw.due_date).and_then(|d| parse_date(&d)),
            tags: tags_from_value(raw.tags),
            assigned_to: value_text(raw.assigned_to).filter(|a| !a.trim().is_empty()),
            recurring,
            recurring_pattern: value_text(raw.recurring_pattern).and_then(|p| p.parse().ok()),
            created_at: value_text(raw.created_at).and_then(|t| parse_timestamp(&t)),
            updated_at: value_text(raw.updated_at).and_then(|t| parse_timestamp(&t)),
            completed_at: value_text(raw.completed_at).and_then(|t| parse_timestamp(&t)),
        };
        if !task.recurring {
            task.recurring_pattern = None;
        }
        task
    }
}
