use super::{find_task, open_configured_store};
use crate::libs::messages::Message;
use crate::libs::task::{Status, TaskPatch};
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task ID or a unique prefix of it
    id: String,
}

pub fn cmd(args: DoneArgs) -> Result<()> {
    let mut store = open_configured_store()?;
    let task = find_task(store.as_ref(), &args.id)?;

    if !store.update(&task.id, &TaskPatch::status(Status::Completed))? {
        msg_bail_anyhow!(Message::TaskNotFound(args.id));
    }

    msg_success!(Message::TaskCompleted(task.title));
    Ok(())
}
