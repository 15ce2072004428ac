#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use taskdesk::db::json_file::{parse_tasks, JsonTasks};
    use taskdesk::db::store::{StoreError, TaskStore};
    use taskdesk::libs::task::{Priority, Status, Task, TaskPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct JsonStoreContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for JsonStoreContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("data").join("tasks.json");
            JsonStoreContext { _temp_dir: temp_dir, path }
        }
    }

    impl JsonStoreContext {
        fn store(&self) -> JsonTasks {
            JsonTasks::open(&self.path)
        }
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_missing_file_is_an_empty_store(ctx: &mut JsonStoreContext) {
        assert!(ctx.store().get_all().unwrap().is_empty());
        assert!(!ctx.path.exists());
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_add_keeps_insertion_order(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        for title in ["first", "second", "third"] {
            store.add(Task::new(title, "")).unwrap();
        }

        let reopened = ctx.store();
        let titles: Vec<String> = reopened.get_all().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_file_is_keyed_by_id(ctx: &mut JsonStoreContext) {
        let task = Task::new("Write report", "Quarterly numbers");
        let id = task.id.clone();
        ctx.store().add(task).unwrap();

        let content: serde_json::Value = serde_json::from_str(&fs::read_to_string(&ctx.path).unwrap()).unwrap();
        assert_eq!(content[&id]["title"], "Write report");
        assert_eq!(content[&id]["status"], "Not Started");
        assert_eq!(content[&id]["priority"], "Medium");
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_duplicate_id_is_rejected(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        let task = Task::new("Original", "");
        let mut copy = Task::new("Copy", "");
        copy.id = task.id.clone();

        store.add(task).unwrap();
        assert!(matches!(store.add(copy), Err(StoreError::DuplicateId(_))));
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_invalid_task_is_not_written(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        assert!(matches!(store.add(Task::new("   ", "")), Err(StoreError::Validation(_))));
        assert!(!ctx.path.exists());
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_update_and_completion_timestamps(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        let task = Task::new("Draft", "");
        let id = task.id.clone();
        store.add(task).unwrap();
        let created = store.get(&id).unwrap().unwrap();

        let patch = TaskPatch {
            title: Some("Final".to_string()),
            priority: Some(Priority::High),
            status: Some(Status::Completed),
            ..Default::default()
        };
        assert!(store.update(&id, &patch).unwrap());

        let updated = store.get(&id).unwrap().unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.priority, Priority::High);
        assert!(updated.completed_at.is_some());
        assert_eq!(updated.created_at, created.created_at);

        assert!(store.update(&id, &TaskPatch::status(Status::InProgress)).unwrap());
        assert_eq!(store.get(&id).unwrap().unwrap().completed_at, None);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_invalid_update_leaves_task_untouched(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        let task = Task::new("Keep me", "");
        let id = task.id.clone();
        store.add(task).unwrap();

        let patch = TaskPatch {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(store.update(&id, &patch), Err(StoreError::Validation(_))));
        assert_eq!(store.get(&id).unwrap().unwrap().title, "Keep me");
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_unknown_ids(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        store.add(Task::new("Only", "")).unwrap();

        assert!(store.get("missing").unwrap().is_none());
        assert!(!store.update("missing", &TaskPatch::status(Status::Completed)).unwrap());
        assert!(!store.delete("missing").unwrap());
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_delete(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        let task = Task::new("Temporary", "");
        let id = task.id.clone();
        store.add(task).unwrap();
        store.add(Task::new("Stays", "")).unwrap();

        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        let remaining = store.get_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Stays");
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_hand_edited_file_is_read_tolerantly(ctx: &mut JsonStoreContext) {
        fs::create_dir_all(ctx.path.parent().unwrap()).unwrap();
        fs::write(
            &ctx.path,
            r#"{
                "abc": {
                    "id": "something-else",
                    "title": "Hand written",
                    "priority": "urgent",
                    "status": "in_progress",
                    "tags": "home, errands",
                    "due_date": "someday"
                },
                "broken": 42
            }"#,
        )
        .unwrap();

        let tasks = ctx.store().get_all().unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, "abc");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.tags, vec!["home", "errands"]);
        assert_eq!(task.due_date, None);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_corrupt_file_is_an_error(ctx: &mut JsonStoreContext) {
        fs::create_dir_all(ctx.path.parent().unwrap()).unwrap();
        fs::write(&ctx.path, "{ not json").unwrap();
        assert!(matches!(ctx.store().get_all(), Err(StoreError::Json(_))));

        fs::write(&ctx.path, "42").unwrap();
        assert!(ctx.store().get_all().is_err());
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_import_skips_existing_and_invalid(ctx: &mut JsonStoreContext) {
        let mut store = ctx.store();
        let existing = Task::new("Existing", "");
        let mut duplicate = Task::new("Duplicate", "");
        duplicate.id = existing.id.clone();
        store.add(existing).unwrap();

        let imported = store.import(vec![duplicate, Task::new("", ""), Task::new("Fresh", "")]).unwrap();
        assert_eq!(imported, 1);

        let titles: Vec<String> = store.get_all().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Existing", "Fresh"]);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_array_file_without_ids_keeps_every_record(ctx: &mut JsonStoreContext) {
        fs::create_dir_all(ctx.path.parent().unwrap()).unwrap();
        fs::write(&ctx.path, r#"[{"title": "One"}, {"title": "Two"}]"#).unwrap();

        let mut store = ctx.store();
        let loaded = store.get_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|t| !t.id.is_empty()));
        assert_ne!(loaded[0].id, loaded[1].id);

        let again = ctx.store().get_all().unwrap();
        let ids: Vec<&str> = again.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, loaded.iter().map(|t| t.id.as_str()).collect::<Vec<_>>());
        assert!(store.get(&loaded[0].id).unwrap().is_some());

        store.add(Task::new("Three", "")).unwrap();
        let titles: Vec<String> = ctx.store().get_all().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test_context(JsonStoreContext)]
    #[test]
    fn test_repeated_ids_are_rekeyed_not_dropped(ctx: &mut JsonStoreContext) {
        fs::create_dir_all(ctx.path.parent().unwrap()).unwrap();
        fs::write(&ctx.path, r#"[{"id": "same", "title": "First"}, {"id": "same", "title": "Second"}]"#).unwrap();

        let mut store = ctx.store();
        store.add(Task::new("Third", "")).unwrap();

        let tasks = store.get_all().unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(tasks[0].id, "same");
        assert_ne!(tasks[1].id, "same");
    }

    #[test]
    fn test_parse_tasks_accepts_an_array() {
        let tasks = parse_tasks(r#"[{"title": "One"}, {"title": "Two", "status": "Completed"}]"#).unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].id.is_empty());
        assert_eq!(tasks[1].status, Status::Completed);
        assert!(parse_tasks("   ").unwrap().is_empty());
    }
}
