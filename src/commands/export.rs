use super::open_configured_store;
use crate::libs::export::{ExportFormat, Exporter};
use crate::libs::messages::Message;
use crate::libs::query::{self, SortKey, TaskQuery};
use crate::{msg_info, msg_warning};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file. Defaults to a timestamped name in the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only export tasks carrying this tag
    #[arg(short, long)]
    tag: Option<String>,

    #[arg(short, long, value_enum, default_value = "priority")]
    sort: SortKey,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let tasks = open_configured_store()?.get_all()?;
    let params = TaskQuery {
        tag: args.tag,
        sort: args.sort,
        show_completed: true,
        ..Default::default()
    };
    let tasks = query::query(&tasks, &params);

    if tasks.is_empty() {
        msg_warning!(Message::TasksNotFound);
        return Ok(());
    }

    msg_info!(Message::ExportingTasks(tasks.len()));
    Exporter::new(args.format, args.output).export(&tasks)
}
