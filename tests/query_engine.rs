#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskdesk::libs::query::{self, SortKey, TaskQuery};
    use taskdesk::libs::task::{Priority, Status, Task};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(title: &str, priority: Priority, status: Status, due: Option<NaiveDate>, tags: &[&str]) -> Task {
        let mut task = Task::new(title, "");
        task.priority = priority;
        task.status = status;
        task.due_date = due;
        task.tags = tags.iter().map(|t| t.to_string()).collect();
        task
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_search_matches_title_or_description_ignoring_case() {
        let mut with_description = Task::new("Weekly sync", "Discuss the Parser rewrite");
        with_description.tags = vec!["meetings".to_string()];
        let tasks = vec![Task::new("Fix PARSER bug", ""), with_description, Task::new("Water plants", "")];

        let found = query::filter(&tasks, Some("parser"), None);
        assert_eq!(titles(&found), vec!["Fix PARSER bug", "Weekly sync"]);

        let found = query::filter(&tasks, Some("parser"), Some("meetings"));
        assert_eq!(titles(&found), vec!["Weekly sync"]);
    }

    #[test]
    fn test_empty_criteria_return_everything() {
        let tasks = vec![Task::new("One", ""), Task::new("Two", "")];
        assert_eq!(query::filter(&tasks, None, None).len(), 2);
        assert_eq!(query::filter(&tasks, Some(""), Some("")).len(), 2);
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let tasks = vec![
            task("A", Priority::Low, Status::NotStarted, None, &["work"]),
            task("B", Priority::Low, Status::NotStarted, None, &["workshop"]),
        ];
        assert_eq!(titles(&query::filter(&tasks, None, Some("work"))), vec!["A"]);
        assert!(query::filter(&tasks, None, Some("Work")).is_empty());
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let tasks = vec![
            task("low-1", Priority::Low, Status::NotStarted, None, &[]),
            task("high-1", Priority::High, Status::NotStarted, None, &[]),
            task("medium-1", Priority::Medium, Status::NotStarted, None, &[]),
            task("high-2", Priority::High, Status::NotStarted, None, &[]),
            task("low-2", Priority::Low, Status::NotStarted, None, &[]),
        ];
        let sorted = query::sort(tasks, SortKey::Priority);
        assert_eq!(titles(&sorted), vec!["high-1", "high-2", "medium-1", "low-1", "low-2"]);
    }

    #[test]
    fn test_due_date_sort_puts_undated_last() {
        let tasks = vec![
            task("undated-1", Priority::Medium, Status::NotStarted, None, &[]),
            task("late", Priority::Medium, Status::NotStarted, Some(date(2025, 7, 1)), &[]),
            task("undated-2", Priority::Medium, Status::NotStarted, None, &[]),
            task("early", Priority::Medium, Status::NotStarted, Some(date(2025, 6, 1)), &[]),
        ];
        let sorted = query::sort(tasks, SortKey::DueDate);
        assert_eq!(titles(&sorted), vec!["early", "late", "undated-1", "undated-2"]);
    }

    #[test]
    fn test_status_sort_follows_progress() {
        let tasks = vec![
            task("done", Priority::Medium, Status::Completed, None, &[]),
            task("doing", Priority::Medium, Status::InProgress, None, &[]),
            task("todo", Priority::Medium, Status::NotStarted, None, &[]),
        ];
        let sorted = query::sort(tasks, SortKey::Status);
        assert_eq!(titles(&sorted), vec!["todo", "doing", "done"]);
    }

    #[test]
    fn test_query_hides_completed_unless_asked() {
        let tasks = vec![
            task("open", Priority::Low, Status::NotStarted, None, &[]),
            task("closed", Priority::High, Status::Completed, None, &[]),
        ];

        let params = TaskQuery::default();
        assert_eq!(titles(&query::query(&tasks, &params)), vec!["open"]);

        let params = TaskQuery {
            show_completed: true,
            ..Default::default()
        };
        assert_eq!(titles(&query::query(&tasks, &params)), vec!["closed", "open"]);

        let (active, completed) = query::partition_completed(tasks);
        assert_eq!(titles(&active), vec!["open"]);
        assert_eq!(titles(&completed), vec!["closed"]);
    }

    #[test]
    fn test_statistics_classify_due_dates() {
        let today = date(2025, 6, 10);
        let tasks = vec![
            task("overdue", Priority::High, Status::NotStarted, Some(date(2025, 6, 9)), &[]),
            task("due today", Priority::High, Status::InProgress, Some(today), &[]),
            task("due at limit", Priority::Medium, Status::NotStarted, Some(date(2025, 6, 13)), &[]),
            task("later", Priority::Low, Status::NotStarted, Some(date(2025, 6, 14)), &[]),
            task("completed late", Priority::Low, Status::Completed, Some(date(2025, 6, 1)), &[]),
            task("undated", Priority::Medium, Status::NotStarted, None, &[]),
        ];

        let stats = query::statistics(&tasks, today);
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.overdue_count, 1);
        assert_eq!(stats.due_soon_count, 2);
        assert_eq!(stats.status_counts.get(Status::NotStarted), 4);
        assert_eq!(stats.status_counts.get(Status::InProgress), 1);
        assert_eq!(stats.status_counts.get(Status::Completed), 1);
        assert_eq!(stats.priority_counts.get(Priority::High), 2);
        assert_eq!(stats.priority_counts.get(Priority::Medium), 2);
        assert_eq!(stats.priority_counts.get(Priority::Low), 2);
        assert_eq!(stats.status_counts.total(), stats.total_tasks);
        assert_eq!(stats.priority_counts.total(), stats.total_tasks);
        assert_eq!(query::completion_rate(&stats), 16);
    }

    #[test]
    fn test_statistics_of_nothing() {
        let stats = query::statistics(&[], date(2025, 6, 10));
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.overdue_count, 0);
        assert_eq!(query::completion_rate(&stats), 0);
    }

    #[test]
    fn test_statistics_serialize_with_display_labels() {
        let tasks = vec![task("a", Priority::High, Status::InProgress, None, &[])];
        let value = serde_json::to_value(query::statistics(&tasks, date(2025, 6, 10))).unwrap();
        assert_eq!(value["status_counts"]["In Progress"], 1);
        assert_eq!(value["priority_counts"]["High"], 1);
    }

    #[test]
    fn test_tags_are_sorted_and_counted() {
        let tasks = vec![
            task("a", Priority::Medium, Status::NotStarted, None, &["zeta", "alpha"]),
            task("b", Priority::Medium, Status::NotStarted, None, &["alpha"]),
            task("c", Priority::Medium, Status::NotStarted, None, &[]),
        ];
        assert_eq!(query::all_tags(&tasks), vec!["alpha", "zeta"]);

        let counts = query::tag_counts(&tasks);
        assert_eq!(counts.get("alpha"), Some(&2));
        assert_eq!(counts.get("zeta"), Some(&1));
    }

    #[test]
    fn test_all_tags_merge_list_and_string_forms() {
        let listed = task("listed", Priority::Medium, Status::NotStarted, None, &["b", "a"]);
        let stored: Task = serde_json::from_value(serde_json::json!({ "title": "stored", "tags": "a, c" })).unwrap();
        assert_eq!(query::all_tags(&[listed, stored]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_tag_matches_nothing() {
        let tasks = vec![task("a", Priority::Medium, Status::NotStarted, None, &["work"])];
        assert!(query::filter(&tasks, None, Some("missing")).is_empty());
        assert!(query::all_tags(&[]).is_empty());
    }

    #[test]
    fn test_created_per_day() {
        let mut early = Task::new("early", "");
        early.created_at = taskdesk::libs::task::parse_timestamp("2025-06-01 08:00:00");
        let mut late = early.clone();
        late.created_at = taskdesk::libs::task::parse_timestamp("2025-06-01 21:30:00");
        let mut unknown = Task::new("unknown", "");
        unknown.created_at = None;

        let per_day = query::created_per_day(&[early, late, unknown]);
        assert_eq!(per_day.len(), 1);
        assert_eq!(per_day.get(&date(2025, 6, 1)), Some(&2));
    }
}
