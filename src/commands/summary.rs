use super::open_configured_store;
use crate::api::ai::{GeminiClient, SuggestionProvider};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::task::{now, Task};
use crate::{msg_error_anyhow, msg_info, msg_print};
use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use clap::Args;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// How many days back completed tasks count as achievements
    #[arg(long, default_value_t = 7)]
    days: u32,
}

pub async fn cmd(args: SummaryArgs) -> Result<()> {
    let tasks = open_configured_store()?.get_all()?;
    let since = now() - Duration::days(i64::from(args.days));
    let (completed, pending) = split_for_summary(tasks, since);

    if completed.is_empty() && pending.is_empty() {
        msg_info!(Message::AiNothingToSummarize);
        return Ok(());
    }

    let config = Config::read()?;
    let client = GeminiClient::from_config(&config)?;

    msg_info!(Message::AiGeneratingSummary);
    let text = client
        .weekly_summary(&completed, &pending)
        .await
        .map_err(|e| msg_error_anyhow!(Message::AiSuggestionFailed(e.to_string())))?;

    msg_print!(Message::WeeklySummaryHeader, true);
    println!("{}", text.trim());
    Ok(())
}

/// Tasks completed at or after `since`, and every task not yet completed.
fn split_for_summary(tasks: Vec<Task>, since: NaiveDateTime) -> (Vec<Task>, Vec<Task>) {
    let mut completed = Vec::new();
    let mut pending = Vec::new();
    for task in tasks {
        if !task.is_completed() {
            pending.push(task);
        } else if task.completed_at.is_some_and(|at| at >= since) {
            completed.push(task);
        }
    }
    (completed, pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::{parse_timestamp, Status};

    #[test]
    fn old_completions_are_left_out() {
        let since = parse_timestamp("2025-06-03 00:00:00").unwrap();

        let mut recent = Task::new("Ship release", "");
        recent.status = Status::Completed;
        recent.completed_at = parse_timestamp("2025-06-09 10:00:00");

        let mut old = Task::new("Old cleanup", "");
        old.status = Status::Completed;
        old.completed_at = parse_timestamp("2025-05-01 10:00:00");

        let open = Task::new("Plan sprint", "");

        let (completed, pending) = split_for_summary(vec![recent, old, open], since);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].title, "Ship release");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Plan sprint");
    }
}
