use super::{find_task, open_configured_store};
use crate::api::ai::{GeminiClient, SuggestionProvider};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ImproveArgs {
    /// Task ID or a unique prefix of it
    id: String,
}

pub async fn cmd(args: ImproveArgs) -> Result<()> {
    let store = open_configured_store()?;
    let task = find_task(store.as_ref(), &args.id)?;

    let config = Config::read()?;
    let client = GeminiClient::from_config(&config)?;

    msg_info!(Message::AiReviewingTask(task.title.clone()));
    let text = client
        .improve(&task.title, &task.description)
        .await
        .map_err(|e| msg_error_anyhow!(Message::AiSuggestionFailed(e.to_string())))?;

    msg_print!(Message::AiImprovementsHeader, true);
    println!("{}", text);
    Ok(())
}
