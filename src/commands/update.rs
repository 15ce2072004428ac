use super::{find_task, open_configured_store, parse_due};
use crate::libs::messages::Message;
use crate::libs::task::{split_tags, Priority, RecurringPattern, Status, TaskPatch};
use crate::{msg_bail_anyhow, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Default, Args)]
pub struct UpdateArgs {
    /// Task ID or a unique prefix of it
    id: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long, value_enum)]
    priority: Option<Priority>,

    #[arg(short, long, value_enum)]
    status: Option<Status>,

    /// New due date: YYYY-MM-DD, today, tomorrow or "in 3d"
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,

    #[arg(long)]
    clear_due: bool,

    /// Replace all tags with this comma-separated list (empty to remove all)
    #[arg(short, long)]
    tags: Option<String>,

    #[arg(short, long, conflicts_with = "clear_assignee")]
    assign: Option<String>,

    #[arg(long)]
    clear_assignee: bool,

    #[arg(short, long, value_enum, conflicts_with = "no_recurring")]
    recurring: Option<RecurringPattern>,

    #[arg(long)]
    no_recurring: bool,
}

impl UpdateArgs {
    fn to_patch(&self) -> Result<TaskPatch> {
        let due_date = match (&self.due, self.clear_due) {
            (_, true) => Some(None),
            (Some(raw), false) => Some(Some(parse_due(raw)?)),
            (None, false) => None,
        };
        let assigned_to = match (&self.assign, self.clear_assignee) {
            (_, true) => Some(None),
            (Some(who), false) => Some(Some(who.clone())),
            (None, false) => None,
        };
        let (recurring, recurring_pattern) = match (self.recurring, self.no_recurring) {
            (_, true) => (Some(false), Some(None)),
            (Some(pattern), false) => (Some(true), Some(Some(pattern))),
            (None, false) => (None, None),
        };

        Ok(TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            due_date,
            tags: self.tags.as_deref().map(split_tags),
            assigned_to,
            recurring,
            recurring_pattern,
        })
    }
}

pub fn cmd(args: UpdateArgs) -> Result<()> {
    let patch = args.to_patch()?;
    if patch.is_empty() {
        msg_warning!(Message::NoChangesProvided);
        return Ok(());
    }

    let mut store = open_configured_store()?;
    let task = find_task(store.as_ref(), &args.id)?;

    match store.update(&task.id, &patch) {
        Ok(true) => {}
        Ok(false) => msg_bail_anyhow!(Message::TaskNotFound(args.id)),
        Err(crate::db::store::StoreError::Validation(e)) => msg_bail_anyhow!(Message::TaskInvalid(e.to_string())),
        Err(e) => return Err(e.into()),
    }

    let title = patch.title.as_deref().map(str::trim).unwrap_or(&task.title);
    msg_success!(Message::TaskUpdated(title.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_flags_become_explicit_clears() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            clear_due: true,
            clear_assignee: true,
            no_recurring: true,
            ..Default::default()
        };
        let patch = args.to_patch().unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.assigned_to, Some(None));
        assert_eq!(patch.recurring, Some(false));
        assert_eq!(patch.recurring_pattern, Some(None));
    }

    #[test]
    fn empty_args_make_an_empty_patch() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            ..Default::default()
        };
        assert!(args.to_patch().unwrap().is_empty());
    }

    #[test]
    fn tags_are_split_and_pattern_implies_recurring() {
        let args = UpdateArgs {
            id: "abc".to_string(),
            tags: Some("ops, infra,,ops".to_string()),
            recurring: Some(RecurringPattern::Weekly),
            ..Default::default()
        };
        let patch = args.to_patch().unwrap();
        assert_eq!(patch.tags, Some(vec!["ops".to_string(), "infra".to_string()]));
        assert_eq!(patch.recurring, Some(true));
        assert_eq!(patch.recurring_pattern, Some(Some(RecurringPattern::Weekly)));
    }
}
