//! Task export to CSV, JSON and Excel.
//!
//! ```rust,no_run
//! use taskdesk::libs::export::{ExportFormat, Exporter};
//! use taskdesk::libs::task::Task;
//!
//! let tasks = vec![Task::new("Write docs", "")];
//! Exporter::new(ExportFormat::Csv, None).export(&tasks).unwrap();
//! ```

use super::task::{Task, DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

pub const HEADERS: [&str; 12] = [
    "ID",
    "Title",
    "Description",
    "Priority",
    "Status",
    "Due Date",
    "Tags",
    "Assigned To",
    "Recurring",
    "Created At",
    "Updated At",
    "Completed At",
];

fn timestamp_cell(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format(TIMESTAMP_FORMAT).to_string()).unwrap_or_default()
}

/// One task flattened to the export columns, in [`HEADERS`] order.
fn task_cells(task: &Task) -> [String; 12] {
    let recurring = match (task.recurring, task.recurring_pattern) {
        (true, Some(pattern)) => pattern.to_string(),
        (true, None) => "Yes".to_string(),
        (false, _) => String::new(),
    };
    [
        task.id.clone(),
        task.title.clone(),
        task.description.clone(),
        task.priority.to_string(),
        task.status.to_string(),
        task.due_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
        task.tags.join(", "),
        task.assigned_to.clone().unwrap_or_default(),
        recurring,
        timestamp_cell(task.created_at),
        timestamp_cell(task.updated_at),
        timestamp_cell(task.completed_at),
    ]
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named `taskdesk_export_<timestamp>.<ext>`
    /// in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            PathBuf::from(format!("taskdesk_export_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), format.extension()))
        });
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export(&self, tasks: &[Task]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(tasks)?,
            ExportFormat::Json => self.export_json(tasks)?,
            ExportFormat::Excel => self.export_excel(tasks)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, tasks: &[Task]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(HEADERS)?;

        for task in tasks {
            wtr.write_record(task_cells(task))?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_excel(&self, tasks: &[Task]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Tasks")?;

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, task) in tasks.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, cell) in task_cells(task).iter().enumerate() {
                worksheet.write_string(row, col as u16, cell)?;
            }
        }

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
