//! Display implementation for taskdesk messages.
//!
//! All user-facing text lives here, so commands and library code only ever
//! deal with typed [`Message`] values. Prefix emojis are added by the
//! `msg_*!` macros, not by the text below.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskCompleted(title) => format!("Task '{}' marked as completed", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskNotFound(id) => format!("Task with ID '{}' not found", id),
            Message::TaskInvalid(reason) => format!("Invalid task: {}", reason),
            Message::TaskAlreadyExists(id) => format!("A task with ID '{}' already exists", id),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TasksHeader => "📋 Tasks".to_string(),
            Message::CompletedTasksHeader => "✔️ Completed tasks".to_string(),
            Message::TaskDetailsHeader => "📝 Task details".to_string(),
            Message::NoChangesProvided => "Nothing to update: no fields were given".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidDate(raw) => format!("Invalid date '{}': use YYYY-MM-DD, today, tomorrow or 'in Nd'", raw),

            // === TAG MESSAGES ===
            Message::TagsHeader => "🏷️ Tags".to_string(),
            Message::NoTagsFound => "No tags found".to_string(),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader => "📊 Task statistics".to_string(),
            Message::CompletionRate(rate) => format!("Completion rate: {}%", rate),
            Message::TagUsageHeader => "Tasks per tag".to_string(),
            Message::CreatedPerDayHeader => "Tasks created per day".to_string(),

            // === STORAGE MESSAGES ===
            Message::StoreOpened(backend, path) => format!("Using {} task store at {}", backend, path),
            Message::MalformedRecordSkipped(key) => format!("Skipping malformed task record '{}'", key),
            Message::TasksImported(imported, total) => format!("Imported {} of {} tasks", imported, total),
            Message::ImportSkipped(id, reason) => format!("Skipped task '{}': {}", id, reason),
            Message::ImportFileEmpty(path) => format!("No tasks found in {}", path),

            // === EXPORT MESSAGES ===
            Message::ExportingTasks(count) => format!("Exporting {} tasks...", count),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleStorage => "Storage settings".to_string(),
            Message::ConfigModuleAi => "AI assistant settings".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptStorageBackend => "Select storage backend".to_string(),
            Message::PromptStoragePath => "Enter storage file path (empty for default)".to_string(),
            Message::PromptAiApiUrl => "Enter the Gemini API URL".to_string(),
            Message::PromptAiModel => "Enter the Gemini model name".to_string(),
            Message::PromptAiApiKey => "Enter your Gemini API key".to_string(),

            // === AI MESSAGES ===
            Message::AiRequestingSuggestions => "Asking the AI assistant for suggestions...".to_string(),
            Message::AiSuggestionsHeader => "🤖 AI suggestions".to_string(),
            Message::AiSuggestionFailed(e) => format!("AI suggestion failed: {}", e),
            Message::AiSuggestionApplied(fields) => format!("Applied AI suggestions: {}", fields),
            Message::AiGeneratingSummary => "Generating weekly summary...".to_string(),
            Message::AiNothingToSummarize => "There are no tasks to summarize".to_string(),
            Message::WeeklySummaryHeader => "🗓️ Weekly summary".to_string(),
            Message::AiReviewingTask(title) => format!("Reviewing task '{}'...", title),
            Message::AiImprovementsHeader => "✏️ Suggested improvements".to_string(),
            Message::AiPrioritizingTasks(count) => format!("Prioritizing {} task(s)...", count),
            Message::AiNothingToPrioritize => "There are no open tasks to prioritize".to_string(),
            Message::PrioritizationHeader => "📋 Recommended order".to_string(),

            // === MIGRATION MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, e) => format!("Migration v{} failed: {}", version, e),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
        };
        write!(f, "{}", s)
    }
}
