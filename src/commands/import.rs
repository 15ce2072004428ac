use super::open_configured_store;
use crate::db::json_file::parse_tasks;
use crate::libs::messages::Message;
use crate::{msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an object keyed by task ID or an array of tasks
    file: PathBuf,
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)?;
    let parsed = parse_tasks(&content)?;
    let total = parsed.len();
    if total == 0 {
        msg_warning!(Message::ImportFileEmpty(args.file.display().to_string()));
        return Ok(());
    }

    let mut store = open_configured_store()?;
    let mut accepted = Vec::with_capacity(total);
    for task in parsed {
        if !task.id.is_empty() && store.get(&task.id)?.is_some() {
            msg_warning!(Message::ImportSkipped(task.id, "a task with this ID already exists".to_string()));
            continue;
        }
        if let Err(e) = task.validate() {
            msg_warning!(Message::ImportSkipped(task.title, e.to_string()));
            continue;
        }
        accepted.push(task);
    }

    let imported = store.import(accepted)?;
    msg_success!(Message::TasksImported(imported, total));
    Ok(())
}
