#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskCompleted(String),
    TaskDeleted(String),
    TaskNotFound(String),
    TaskInvalid(String),
    TaskAlreadyExists(String),
    TasksNotFound,
    TasksHeader,
    CompletedTasksHeader,
    TaskDetailsHeader,
    NoChangesProvided,
    ConfirmDeleteTask(String),
    OperationCancelled,
    InvalidDate(String),

    // === TAG MESSAGES ===
    TagsHeader,
    NoTagsFound,

    // === STATISTICS MESSAGES ===
    StatisticsHeader,
    CompletionRate(u32),
    TagUsageHeader,
    CreatedPerDayHeader,

    // === STORAGE MESSAGES ===
    StoreOpened(String, String), // backend, path
    MalformedRecordSkipped(String),
    TasksImported(usize, usize), // imported, total
    ImportSkipped(String, String), // id, reason
    ImportFileEmpty(String),

    // === EXPORT MESSAGES ===
    ExportingTasks(usize),
    ExportCompleted(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleStorage,
    ConfigModuleAi,
    PromptSelectModules,
    PromptStorageBackend,
    PromptStoragePath,
    PromptAiApiUrl,
    PromptAiModel,
    PromptAiApiKey,

    // === AI MESSAGES ===
    AiRequestingSuggestions,
    AiSuggestionsHeader,
    AiSuggestionFailed(String),
    AiSuggestionApplied(String),
    AiGeneratingSummary,
    AiNothingToSummarize,
    WeeklySummaryHeader,
    AiReviewingTask(String),
    AiImprovementsHeader,
    AiPrioritizingTasks(usize),
    AiNothingToPrioritize,
    PrioritizationHeader,

    // === MIGRATION MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}
