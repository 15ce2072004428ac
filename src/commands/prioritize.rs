use super::open_configured_store;
use crate::api::ai::{GeminiClient, SuggestionProvider};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::{msg_error_anyhow, msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct PrioritizeArgs {
    /// Extra guidance for the assistant, e.g. "release on Friday"
    #[arg(short, long, default_value = "")]
    context: String,

    /// Also include completed tasks
    #[arg(long)]
    show_completed: bool,
}

pub async fn cmd(args: PrioritizeArgs) -> Result<()> {
    let tasks = open_candidates(open_configured_store()?.get_all()?, args.show_completed);
    if tasks.is_empty() {
        msg_info!(Message::AiNothingToPrioritize);
        return Ok(());
    }

    let config = Config::read()?;
    let client = GeminiClient::from_config(&config)?;

    msg_info!(Message::AiPrioritizingTasks(tasks.len()));
    let text = client
        .prioritize(&tasks, &args.context)
        .await
        .map_err(|e| msg_error_anyhow!(Message::AiSuggestionFailed(e.to_string())))?;

    msg_print!(Message::PrioritizationHeader, true);
    println!("{}", text);
    Ok(())
}

fn open_candidates(tasks: Vec<Task>, show_completed: bool) -> Vec<Task> {
    tasks.into_iter().filter(|t| show_completed || !t.is_completed()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::Status;

    #[test]
    fn completed_tasks_are_skipped_by_default() {
        let mut done = Task::new("Ship release", "");
        done.status = Status::Completed;
        let open = Task::new("Plan sprint", "");

        let tasks = open_candidates(vec![done.clone(), open.clone()], false);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Plan sprint");

        assert_eq!(open_candidates(vec![done, open], true).len(), 2);
    }
}
