#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use taskdesk::libs::export::{ExportFormat, Exporter, HEADERS};
    use taskdesk::libs::task::{Priority, RecurringPattern, Status, Task};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        tasks: Vec<Task>,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let mut report = Task::new("Write report", "Quarterly, with charts");
            report.priority = Priority::High;
            report.due_date = NaiveDate::from_ymd_opt(2025, 6, 12);
            report.tags = vec!["work".to_string(), "writing".to_string()];

            let mut standup = Task::new("Standup", "");
            standup.status = Status::Completed;
            standup.recurring = true;
            standup.recurring_pattern = Some(RecurringPattern::Daily);

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                tasks: vec![report, standup],
            }
        }
    }

    impl ExportTestContext {
        fn path(&self, name: &str) -> PathBuf {
            self.temp_dir.path().join(name)
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_export(ctx: &mut ExportTestContext) {
        let path = ctx.path("tasks.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone())).export(&ctx.tasks).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, HEADERS.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Write report");
        assert_eq!(&rows[0][2], "Quarterly, with charts");
        assert_eq!(&rows[0][3], "High");
        assert_eq!(&rows[0][5], "2025-06-12");
        assert_eq!(&rows[0][6], "work, writing");
        assert_eq!(&rows[1][4], "Completed");
        assert_eq!(&rows[1][8], "Daily");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_export(ctx: &mut ExportTestContext) {
        let path = ctx.path("tasks.json");
        Exporter::new(ExportFormat::Json, Some(path.clone())).export(&ctx.tasks).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Write report");
        assert_eq!(items[0]["tags"], serde_json::json!(["work", "writing"]));
        assert_eq!(items[1]["recurring_pattern"], "Daily");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_excel_export(ctx: &mut ExportTestContext) {
        let path = ctx.path("tasks.xlsx");
        Exporter::new(ExportFormat::Excel, Some(path.clone())).export(&ctx.tasks).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_default_file_name_uses_format_extension() {
        let exporter = Exporter::new(ExportFormat::Excel, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("taskdesk_export_"));
        assert!(name.ends_with(".xlsx"));
    }
}
