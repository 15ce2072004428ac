use super::{open_configured_store, parse_due};
use crate::api::ai::{apply_suggestion, GeminiClient, SuggestionProvider};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::{split_tags, Priority, RecurringPattern, Status, Task};
use crate::{msg_bail_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title (at most 100 characters)
    #[arg(required = true)]
    title: String,

    /// Longer description (at most 1000 characters)
    #[arg(short, long, default_value = "")]
    description: String,

    #[arg(short, long, value_enum)]
    priority: Option<Priority>,

    #[arg(short, long, value_enum)]
    status: Option<Status>,

    /// Due date: YYYY-MM-DD, today, tomorrow or "in 3d"
    #[arg(long)]
    due: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    tags: Option<String>,

    #[arg(short, long)]
    assign: Option<String>,

    /// Repeat the task on this schedule
    #[arg(short, long, value_enum)]
    recurring: Option<RecurringPattern>,

    /// Let the AI assistant fill in priority and tags you did not set
    #[arg(long)]
    suggest: bool,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let mut task = build_task(&args)?;
    if let Err(e) = task.validate() {
        msg_bail_anyhow!(Message::TaskInvalid(e.to_string()));
    }

    if args.suggest {
        let config = Config::read()?;
        let client = GeminiClient::from_config(&config)?;
        msg_info!(Message::AiRequestingSuggestions);
        enrich(&client, &mut task, &args).await;
    }

    let title = task.title.clone();
    let id = task.id.clone();
    open_configured_store()?.add(task)?;

    msg_success!(Message::TaskCreated(title));
    println!("{}", id);
    Ok(())
}

fn build_task(args: &AddArgs) -> Result<Task> {
    let mut task = Task::new(&args.title, &args.description);
    task.priority = args.priority.unwrap_or_default();
    task.status = args.status.unwrap_or_default();
    task.due_date = args.due.as_deref().map(parse_due).transpose()?;
    task.tags = args.tags.as_deref().map(split_tags).unwrap_or_default();
    task.assigned_to = args.assign.clone();
    task.recurring = args.recurring.is_some();
    task.recurring_pattern = args.recurring;
    task.normalize();
    Ok(task)
}

/// Applies AI suggestions to unset fields. Failures are reported, not fatal.
async fn enrich<P: SuggestionProvider>(provider: &P, task: &mut Task, args: &AddArgs) {
    let text = if task.description.is_empty() { task.title.clone() } else { format!("{}\n{}", task.title, task.description) };

    match provider.suggest(&text).await {
        Ok(suggestion) => {
            let applied = apply_suggestion(task, &suggestion, args.priority.is_some(), args.tags.is_some());
            if !applied.is_empty() {
                msg_info!(Message::AiSuggestionApplied(applied.join(", ")));
            }
        }
        Err(e) => msg_warning!(Message::AiSuggestionFailed(e.to_string())),
    }
}
