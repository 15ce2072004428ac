//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` function. [`Cli::menu`] parses the command line and dispatches.

pub mod add;
pub mod delete;
pub mod done;
pub mod export;
pub mod import;
pub mod improve;
pub mod init;
pub mod list;
pub mod prioritize;
pub mod show;
pub mod stats;
pub mod suggest;
pub mod summary;
pub mod tags;
pub mod update;

use crate::db::{open_store, store::TaskStore};
use crate::libs::config::Config;
use crate::libs::formatter::parse_due_input;
use crate::libs::messages::Message;
use crate::libs::task::{now, Task};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure storage and the AI assistant")]
    Init(init::InitArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "List, search and sort tasks")]
    List(list::ListArgs),
    #[command(about = "Show a single task")]
    Show(show::ShowArgs),
    #[command(about = "Change fields of a task")]
    Update(update::UpdateArgs),
    #[command(about = "Mark a task as completed")]
    Done(done::DoneArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Show task statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "List all tags")]
    Tags(tags::TagsArgs),
    #[command(about = "Export tasks to CSV, JSON or Excel")]
    Export(export::ExportArgs),
    #[command(about = "Import tasks from a JSON file")]
    Import(import::ImportArgs),
    #[command(about = "Ask the AI assistant about a task description")]
    Suggest(suggest::SuggestArgs),
    #[command(about = "Generate an AI summary of the past week")]
    Summary(summary::SummaryArgs),
    #[command(about = "Ask the AI assistant how to word a task more clearly")]
    Improve(improve::ImproveArgs),
    #[command(about = "Ask the AI assistant for a recommended task order")]
    Prioritize(prioritize::PrioritizeArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args).await,
            Commands::List(args) => list::cmd(args),
            Commands::Show(args) => show::cmd(args),
            Commands::Update(args) => update::cmd(args),
            Commands::Done(args) => done::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Tags(args) => tags::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Suggest(args) => suggest::cmd(args).await,
            Commands::Summary(args) => summary::cmd(args).await,
            Commands::Improve(args) => improve::cmd(args).await,
            Commands::Prioritize(args) => prioritize::cmd(args).await,
        }
    }
}

/// Store selected by the user's configuration.
pub(crate) fn open_configured_store() -> Result<Box<dyn TaskStore>> {
    let config = Config::read()?;
    open_store(&config.storage)
}

/// Finds a task by full ID or by a unique ID prefix.
pub fn find_task(store: &dyn TaskStore, raw_id: &str) -> Result<Task> {
    let raw_id = raw_id.trim();
    if let Some(task) = store.get(raw_id)? {
        return Ok(task);
    }
    if raw_id.is_empty() {
        return Err(msg_error_anyhow!(Message::TaskNotFound(raw_id.to_string())));
    }

    let mut matches = store.get_all()?.into_iter().filter(|t| t.id.starts_with(raw_id));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task),
        _ => Err(msg_error_anyhow!(Message::TaskNotFound(raw_id.to_string()))),
    }
}

/// Parses a user-supplied due date relative to the local date.
pub(crate) fn parse_due(raw: &str) -> Result<NaiveDate> {
    parse_due_input(raw, now().date()).ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(raw.to_string())))
}
