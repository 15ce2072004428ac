use super::{find_task, open_configured_store};
use crate::libs::messages::Message;
use crate::libs::task::now;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Task ID or a unique prefix of it
    id: String,

    #[arg(long)]
    json: bool,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    let store = open_configured_store()?;
    let task = find_task(store.as_ref(), &args.id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
        return Ok(());
    }

    msg_print!(Message::TaskDetailsHeader, true);
    View::task(&task, now().date())
}
