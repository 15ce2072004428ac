use super::open_configured_store;
use crate::libs::messages::Message;
use crate::libs::query::{self, SortKey, TaskQuery};
use crate::libs::task::now;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in titles and descriptions
    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Only tasks carrying this exact tag
    #[arg(short, long)]
    tag: Option<String>,

    #[arg(short, long, value_enum, default_value = "priority")]
    sort: SortKey,

    /// Also list completed tasks, in a separate table
    #[arg(short = 'c', long)]
    show_completed: bool,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let tasks = open_configured_store()?.get_all()?;
    let params = TaskQuery {
        search: args.search,
        tag: args.tag,
        sort: args.sort,
        show_completed: args.show_completed,
    };
    let found = query::query(&tasks, &params);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    let today = now().date();
    let (active, completed) = query::partition_completed(found);
    if !active.is_empty() {
        msg_print!(Message::TasksHeader, true);
        View::tasks(&active, today)?;
    }
    if !completed.is_empty() {
        msg_print!(Message::CompletedTasksHeader, true);
        View::tasks(&completed, today)?;
    }
    Ok(())
}
