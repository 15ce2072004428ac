//! # Taskdesk
//!
//! A command-line task manager. Tasks carry a priority, a status, an optional
//! due date, tags, an assignee and a recurrence pattern, and are kept either in
//! a human-editable JSON file or in SQLite.
//!
//! ## Features
//!
//! - **Task Management**: create, update, complete and delete tasks
//! - **Search and Sorting**: free-text search, tag filter, priority/due date/status order
//! - **Statistics**: counts by status and priority, overdue and due-soon tasks
//! - **Data Export**: CSV, JSON and Excel
//! - **AI Assistant**: priority/tag/effort suggestions and weekly summaries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
