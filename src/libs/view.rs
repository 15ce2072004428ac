use super::formatter::{format_remaining_days, format_tags, truncate};
use super::query::TaskStatistics;
use super::task::{Priority, Status, Task, DATE_FORMAT, TIMESTAMP_FORMAT};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use prettytable::{row, Table};
use std::collections::BTreeMap;

/// Characters of the task ID shown in lists; any unique prefix is accepted as input.
pub const SHORT_ID_LEN: usize = 8;

const TITLE_WIDTH: usize = 40;

pub struct View {}

fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_else(|| "-".to_string())
}

fn timestamp_or_dash(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string()).unwrap_or_else(|| "-".to_string())
}

impl View {
    pub fn tasks(tasks: &[Task], today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "STATUS", "DUE", "TAGS", "ASSIGNEE"]);
        for task in tasks {
            let due = match task.due_date {
                Some(_) if !task.is_completed() => format!("{} ({})", date_or_dash(task.due_date), format_remaining_days(task.due_date, today)),
                _ => date_or_dash(task.due_date),
            };
            table.add_row(row![
                short_id(&task.id),
                truncate(&task.title, TITLE_WIDTH),
                task.priority,
                task.status,
                due,
                format_tags(&task.tags),
                task.assigned_to.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task(task: &Task, today: NaiveDate) -> Result<()> {
        let mut table = Table::new();

        let recurring = match (task.recurring, task.recurring_pattern) {
            (true, Some(pattern)) => pattern.to_string(),
            (true, None) => "Yes".to_string(),
            (false, _) => "No".to_string(),
        };

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["Title", task.title]);
        table.add_row(row!["Description", if task.description.is_empty() { "-" } else { &task.description }]);
        table.add_row(row!["Priority", task.priority]);
        table.add_row(row!["Status", task.status]);
        table.add_row(row!["Due", format!("{} ({})", date_or_dash(task.due_date), format_remaining_days(task.due_date, today))]);
        table.add_row(row!["Tags", format_tags(&task.tags)]);
        table.add_row(row!["Assigned to", task.assigned_to.as_deref().unwrap_or("-")]);
        table.add_row(row!["Recurring", recurring]);
        table.add_row(row!["Created", timestamp_or_dash(task.created_at)]);
        table.add_row(row!["Updated", timestamp_or_dash(task.updated_at)]);
        table.add_row(row!["Completed", timestamp_or_dash(task.completed_at)]);
        table.printstd();

        Ok(())
    }

    pub fn statistics(stats: &TaskStatistics) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["METRIC", "COUNT"]);
        table.add_row(row!["Total", stats.total_tasks]);
        for status in Status::ALL {
            table.add_row(row![status, stats.status_counts.get(status)]);
        }
        for priority in Priority::ALL {
            table.add_row(row![format!("{} priority", priority), stats.priority_counts.get(priority)]);
        }
        table.add_row(row!["Overdue", stats.overdue_count]);
        table.add_row(row!["Due soon", stats.due_soon_count]);
        table.printstd();

        Ok(())
    }

    pub fn tag_counts(counts: &BTreeMap<String, usize>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TAG", "TASKS"]);
        for (tag, count) in counts {
            table.add_row(row![tag, count]);
        }
        table.printstd();

        Ok(())
    }

    pub fn created_per_day(per_day: &BTreeMap<NaiveDate, usize>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "CREATED"]);
        for (date, count) in per_day {
            table.add_row(row![date.format(DATE_FORMAT), count]);
        }
        table.printstd();

        Ok(())
    }
}
