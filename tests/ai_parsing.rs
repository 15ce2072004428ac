#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskdesk::api::ai::{
        apply_suggestion, improvement_prompt, parse_suggestion, prioritization_prompt, summary_prompt, AiError, Effort,
        GeminiClient, SuggestionProvider, TaskSuggestion,
    };
    use taskdesk::libs::config::AiConfig;
    use taskdesk::libs::task::{Priority, Status, Task};

    /// Canned provider standing in for the remote model.
    struct StaticProvider {
        response: &'static str,
    }

    impl SuggestionProvider for StaticProvider {
        async fn suggest(&self, description: &str) -> Result<TaskSuggestion, AiError> {
            taskdesk::api::ai::check_description(description)?;
            parse_suggestion(self.response)
        }

        async fn weekly_summary(&self, completed: &[Task], pending: &[Task]) -> Result<String, AiError> {
            Ok(format!("{} done, {} to go", completed.len(), pending.len()))
        }

        async fn improve(&self, title: &str, _description: &str) -> Result<String, AiError> {
            Ok(format!("Title: {} (revised)", title))
        }

        async fn prioritize(&self, tasks: &[Task], _context: &str) -> Result<String, AiError> {
            Ok(tasks.iter().enumerate().map(|(i, t)| format!("{}. {}", i + 1, t.title)).collect::<Vec<_>>().join("\n"))
        }
    }

    #[test]
    fn test_parse_plain_json() {
        let suggestion = parse_suggestion(
            r#"{"priority": "High", "tags": ["backend", "database"], "effort": "Hard", "summary": "Migrate the schema."}"#,
        )
        .unwrap();
        assert_eq!(suggestion.priority, Some(Priority::High));
        assert_eq!(suggestion.tags, vec!["backend", "database"]);
        assert_eq!(suggestion.effort, Some(Effort::Hard));
        assert_eq!(suggestion.summary.as_deref(), Some("Migrate the schema."));
    }

    #[test]
    fn test_parse_fenced_json_with_string_tags() {
        let text = "Here you go:\n```json\n{\"priority\": \"low\", \"tags\": \"docs, writing\", \"effort\": \"easy\"}\n```";
        let suggestion = parse_suggestion(text).unwrap();
        assert_eq!(suggestion.priority, Some(Priority::Low));
        assert_eq!(suggestion.tags, vec!["docs", "writing"]);
        assert_eq!(suggestion.effort, Some(Effort::Easy));
        assert_eq!(suggestion.summary, None);
    }

    #[test]
    fn test_parse_key_value_fallback() {
        let text = "priority: Medium\ntags: [\"ops\", \"infra\"]\neffort: moderate\nsummary: Rotate the certificates";
        let suggestion = parse_suggestion(text).unwrap();
        assert_eq!(suggestion.priority, Some(Priority::Medium));
        assert_eq!(suggestion.tags, vec!["ops", "infra"]);
        assert_eq!(suggestion.effort, Some(Effort::Medium));
        assert_eq!(suggestion.summary.as_deref(), Some("Rotate the certificates"));
    }

    #[test]
    fn test_unknown_labels_are_dropped() {
        let suggestion = parse_suggestion(r#"{"priority": "Critical", "tags": [], "effort": "epic"}"#).unwrap();
        assert_eq!(suggestion.priority, None);
        assert_eq!(suggestion.effort, None);
        assert!(suggestion.tags.is_empty());
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert!(matches!(parse_suggestion(r#"{"priority": "High"}"#), Err(AiError::InvalidResponse(_))));
        assert!(matches!(parse_suggestion("I cannot help with that."), Err(AiError::InvalidResponse(_))));
    }

    #[test]
    fn test_apply_suggestion_respects_user_choices() {
        let suggestion = TaskSuggestion {
            priority: Some(Priority::High),
            tags: vec!["urgent".to_string()],
            effort: Some(Effort::Easy),
            summary: None,
        };

        let mut task = Task::new("Call the bank", "");
        let applied = apply_suggestion(&mut task, &suggestion, false, false);
        assert_eq!(applied, vec!["priority", "tags"]);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["urgent"]);

        let mut task = Task::new("Call the bank", "");
        task.priority = Priority::Low;
        let applied = apply_suggestion(&mut task, &suggestion, true, false);
        assert_eq!(applied, vec!["tags"]);
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_summary_prompt_lists_due_dates() {
        let mut done = Task::new("Ship release", "");
        done.status = Status::Completed;
        let mut pending = Task::new("Plan sprint", "");
        pending.due_date = NaiveDate::from_ymd_opt(2025, 6, 12);
        let undated = Task::new("Clean backlog", "");

        let prompt = summary_prompt(&[done], &[pending, undated]);
        assert!(prompt.contains("- Ship release"));
        assert!(prompt.contains("- Plan sprint (Due: 2025-06-12)"));
        assert!(prompt.contains("- Clean backlog (Due: Not set)"));

        let prompt = summary_prompt(&[], &[Task::new("Only pending", "")]);
        assert!(prompt.contains("Completed tasks:\nNone"));
    }

    #[test]
    fn test_improvement_prompt_carries_title_and_description() {
        let prompt = improvement_prompt("  Fix login ", "Users get logged out ");
        assert!(prompt.contains("Title: Fix login\n"));
        assert!(prompt.contains("Description: Users get logged out\n"));
        assert!(prompt.contains("more actionable"));
    }

    #[test]
    fn test_prioritization_prompt_numbers_tasks() {
        let mut urgent = Task::new("Renew certificate", "Expires soon");
        urgent.priority = Priority::High;
        urgent.due_date = NaiveDate::from_ymd_opt(2025, 6, 12);
        let mut started = Task::new("Write docs", "");
        started.status = Status::InProgress;

        let prompt = prioritization_prompt(&[urgent, started], "release on Friday");
        assert!(prompt.contains("Task 1:\n- Title: Renew certificate\n- Priority: High"));
        assert!(prompt.contains("- Due date: 2025-06-12\n- Description: Expires soon"));
        assert!(prompt.contains("Task 2:\n- Title: Write docs"));
        assert!(prompt.contains("- Due date: Not set\n- Description: No description"));
        assert!(prompt.contains("Additional context: release on Friday"));

        let prompt = prioritization_prompt(&[Task::new("Only one", "")], " ");
        assert!(prompt.contains("Additional context: None"));
    }

    #[tokio::test]
    async fn test_provider_contract() {
        let provider = StaticProvider {
            response: r#"{"priority": "High", "tags": ["a"], "effort": "Medium"}"#,
        };
        let suggestion = provider.suggest("Prepare the quarterly report").await.unwrap();
        assert_eq!(suggestion.priority, Some(Priority::High));
        assert!(matches!(provider.suggest("hey").await, Err(AiError::DescriptionTooShort)));

        let summary = provider.weekly_summary(&[Task::new("x", "")], &[]).await.unwrap();
        assert_eq!(summary, "1 done, 0 to go");

        let order = provider.prioritize(&[Task::new("b", ""), Task::new("a", "")], "").await.unwrap();
        assert_eq!(order, "1. b\n2. a");
        assert_eq!(provider.improve("Fix", "it").await.unwrap(), "Title: Fix (revised)");
    }

    #[tokio::test]
    async fn test_client_rejects_bad_input_before_any_request() {
        let config = AiConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            model: "unused".to_string(),
        };
        let client = GeminiClient::new(&config, "test-key".to_string());

        assert!(matches!(client.suggest("  fix ").await, Err(AiError::DescriptionTooShort)));
        assert!(matches!(client.weekly_summary(&[], &[]).await, Err(AiError::NothingToSummarize)));
        assert!(matches!(client.improve("Fix login", "  ").await, Err(AiError::TitleAndDescriptionRequired)));
        assert!(matches!(client.improve("", "Users get logged out").await, Err(AiError::TitleAndDescriptionRequired)));
        assert!(matches!(client.prioritize(&[], "").await, Err(AiError::NothingToPrioritize)));
    }
}
