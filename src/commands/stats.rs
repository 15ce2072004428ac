use super::open_configured_store;
use crate::libs::messages::Message;
use crate::libs::query;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use serde_json::json;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,

    /// Also show how many tasks were created per day
    #[arg(long)]
    timeline: bool,
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let tasks = open_configured_store()?.get_all()?;
    let stats = query::statistics_today(&tasks);
    let rate = query::completion_rate(&stats);
    let tag_counts = query::tag_counts(&tasks);

    if args.json {
        let report = json!({
            "statistics": stats,
            "completion_rate": rate,
            "tag_counts": tag_counts,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader, true);
    View::statistics(&stats)?;
    msg_info!(Message::CompletionRate(rate));

    if !tag_counts.is_empty() {
        msg_print!(Message::TagUsageHeader, true);
        View::tag_counts(&tag_counts)?;
    }

    if args.timeline {
        let per_day = query::created_per_day(&tasks);
        if !per_day.is_empty() {
            msg_print!(Message::CreatedPerDayHeader, true);
            View::created_per_day(&per_day)?;
        }
    }
    Ok(())
}
