use super::{find_task, open_configured_store};
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID or a unique prefix of it
    id: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let mut store = open_configured_store()?;
    let task = find_task(store.as_ref(), &args.id)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    if !store.delete(&task.id)? {
        msg_bail_anyhow!(Message::TaskNotFound(args.id));
    }

    msg_success!(Message::TaskDeleted(task.title));
    Ok(())
}
