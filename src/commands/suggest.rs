use crate::api::ai::{GeminiClient, SuggestionProvider, TaskSuggestion};
use crate::libs::config::Config;
use crate::libs::formatter::format_tags;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Task description; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,

    /// Print the suggestion as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: SuggestArgs) -> Result<()> {
    let description = args.description.join(" ");
    let config = Config::read()?;
    let client = GeminiClient::from_config(&config)?;

    msg_info!(Message::AiRequestingSuggestions);
    let suggestion = client
        .suggest(&description)
        .await
        .map_err(|e| msg_error_anyhow!(Message::AiSuggestionFailed(e.to_string())))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestion)?);
    } else {
        print_suggestion(&suggestion);
    }
    Ok(())
}

fn print_suggestion(suggestion: &TaskSuggestion) {
    msg_print!(Message::AiSuggestionsHeader, true);
    let unknown = || "-".to_string();
    println!("Priority: {}", suggestion.priority.map(|p| p.to_string()).unwrap_or_else(unknown));
    println!("Tags:     {}", format_tags(&suggestion.tags));
    println!("Effort:   {}", suggestion.effort.map(|e| e.to_string()).unwrap_or_else(unknown));
    if let Some(summary) = &suggestion.summary {
        println!("Summary:  {}", summary);
    }
}
