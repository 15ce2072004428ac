use super::open_configured_store;
use crate::libs::messages::Message;
use crate::libs::query;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TagsArgs {
    /// Print one tag per line without a header
    #[arg(long)]
    plain: bool,
}

pub fn cmd(args: TagsArgs) -> Result<()> {
    let tasks = open_configured_store()?.get_all()?;
    let tags = query::all_tags(&tasks);

    if tags.is_empty() {
        if !args.plain {
            msg_info!(Message::NoTagsFound);
        }
        return Ok(());
    }

    if !args.plain {
        msg_print!(Message::TagsHeader, true);
    }
    for tag in tags {
        println!("{}", tag);
    }
    Ok(())
}
