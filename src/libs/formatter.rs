//! Small text helpers used by the tables and commands.

use super::task::parse_date;
use chrono::{Duration, NaiveDate};

/// Human-readable distance between `today` and a due date.
///
/// ```rust
/// use chrono::NaiveDate;
/// use taskdesk::libs::formatter::format_remaining_days;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
/// assert_eq!(format_remaining_days(NaiveDate::from_ymd_opt(2025, 6, 8), today), "Overdue by 2 days");
/// assert_eq!(format_remaining_days(None, today), "No due date");
/// ```
pub fn format_remaining_days(due_date: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due_date else {
        return "No due date".to_string();
    };
    match (due - today).num_days() {
        days if days < 0 => format!("Overdue by {} days", -days),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        days => format!("{} days left", days),
    }
}

/// Parses a due date typed by the user: `YYYY-MM-DD`, `today`, `tomorrow` or `in Nd`.
pub fn parse_due_input(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = raw.trim().to_lowercase();
    match input.as_str() {
        "today" => return Some(today),
        "tomorrow" => return days_after(today, 1),
        _ => {}
    }
    if let Some(days) = input.strip_prefix("in ").and_then(|rest| rest.trim().strip_suffix('d')) {
        return days.trim().parse::<i64>().ok().filter(|d| *d >= 0).and_then(|d| days_after(today, d));
    }
    parse_date(&input)
}

/// `None` when the result falls outside the representable date range.
fn days_after(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| today.checked_add_signed(delta))
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}
