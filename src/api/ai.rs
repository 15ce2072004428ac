//! AI-assisted task suggestions backed by the Gemini `generateContent` API.
//!
//! The rest of the application only sees the [`SuggestionProvider`] trait, so
//! the store and query engine never depend on network access, and tests can
//! substitute a canned provider.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::api::ai::{GeminiClient, SuggestionProvider};
//! use taskdesk::libs::config::AiConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = GeminiClient::new(&AiConfig::default(), "api-key".to_string());
//! let suggestion = client.suggest("Prepare slides for the quarterly review").await?;
//! println!("{:?} {:?}", suggestion.priority, suggestion.tags);
//! # Ok(())
//! # }
//! ```

use crate::libs::config::{AiConfig, Config};
use crate::libs::messages::Message;
use crate::libs::secret::{Secret, AI_SECRET_FILE_NAME};
use crate::libs::task::{normalize_tags, split_tags, Priority, Task, DATE_FORMAT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Descriptions shorter than this are not worth a request.
pub const MIN_DESCRIPTION_LEN: usize = 5;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Description too short for analysis")]
    DescriptionTooShort,
    #[error("Both title and description are required")]
    TitleAndDescriptionRequired,
    #[error("No tasks provided for summary")]
    NothingToSummarize,
    #[error("No tasks provided for prioritization")]
    NothingToPrioritize,
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("AI service responded with status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid AI response format: {0}")]
    InvalidResponse(String),
}

/// Rough size of a task as estimated by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Effort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "low" => Ok(Effort::Easy),
            "medium" | "moderate" => Ok(Effort::Medium),
            "hard" | "high" => Ok(Effort::Hard),
            _ => Err(format!("unknown effort '{}'", s)),
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effort::Easy => write!(f, "Easy"),
            Effort::Medium => write!(f, "Medium"),
            Effort::Hard => write!(f, "Hard"),
        }
    }
}

/// What the model proposes for a task description.
///
/// Values the model returned but that do not map onto a known label are
/// dropped (`None`) rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskSuggestion {
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub effort: Option<Effort>,
    pub summary: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait SuggestionProvider {
    /// Suggests priority, tags, effort and a one-line summary for `description`.
    async fn suggest(&self, description: &str) -> Result<TaskSuggestion, AiError>;

    /// Free-text summary of achievements and upcoming priorities.
    async fn weekly_summary(&self, completed: &[Task], pending: &[Task]) -> Result<String, AiError>;

    /// Free-text proposals for a clearer title and description of an existing task.
    async fn improve(&self, title: &str, description: &str) -> Result<String, AiError>;

    /// Free-text recommended order for `tasks`, with `context` as extra guidance.
    async fn prioritize(&self, tasks: &[Task], context: &str) -> Result<String, AiError>;
}

pub fn check_description(description: &str) -> Result<(), AiError> {
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(AiError::DescriptionTooShort);
    }
    Ok(())
}

pub fn suggestion_prompt(description: &str) -> String {
    format!(
        "Analyze the following task description and provide:\n\
         1. Suggested priority (High, Medium, or Low)\n\
         2. 2-3 relevant tags (single words or short phrases)\n\
         3. Estimated effort (Easy, Medium, Hard)\n\
         4. A brief one-sentence summary\n\
         \n\
         Task Description: {}\n\
         \n\
         Format your response as a JSON object with fields: priority, tags, effort, summary.\n\
         Only include these fields, no explanation or additional text.",
        description.trim()
    )
}

pub fn summary_prompt(completed: &[Task], pending: &[Task]) -> String {
    let completed_text = if completed.is_empty() {
        "None".to_string()
    } else {
        completed.iter().map(|t| format!("- {}", t.title)).collect::<Vec<_>>().join("\n")
    };
    let pending_text = if pending.is_empty() {
        "None".to_string()
    } else {
        pending
            .iter()
            .map(|t| {
                let due = t.due_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_else(|| "Not set".to_string());
                format!("- {} (Due: {})", t.title, due)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Generate a concise weekly summary based on the following tasks:\n\
         \n\
         Completed tasks:\n{}\n\
         \n\
         Pending tasks:\n{}\n\
         \n\
         Include:\n\
         1. A summary of achievements (based on completed tasks)\n\
         2. Key priorities for the upcoming week (based on pending tasks)\n\
         3. A productivity tip relevant to the pending tasks\n\
         \n\
         Keep the summary professional, motivating, and brief.",
        completed_text, pending_text
    )
}

pub fn improvement_prompt(title: &str, description: &str) -> String {
    format!(
        "Review the following task title and description and suggest improvements for clarity,\n\
         specificity, and actionability:\n\
         \n\
         Title: {}\n\
         Description: {}\n\
         \n\
         Provide suggestions for:\n\
         1. An improved title (if needed)\n\
         2. An improved description (if needed)\n\
         3. A specific recommendation to make the task more actionable\n\
         \n\
         Keep suggestions concise and practical.",
        title.trim(),
        description.trim()
    )
}

pub fn prioritization_prompt(tasks: &[Task], context: &str) -> String {
    let not_set = || "Not set".to_string();
    let tasks_text = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let due = t.due_date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_else(not_set);
            let description = if t.description.trim().is_empty() { "No description" } else { t.description.trim() };
            format!(
                "Task {}:\n- Title: {}\n- Priority: {}\n- Status: {}\n- Due date: {}\n- Description: {}",
                i + 1,
                t.title,
                t.priority,
                t.status,
                due,
                description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    let context = if context.trim().is_empty() { "None" } else { context.trim() };

    format!(
        "Review the following list of tasks and suggest a prioritized order based on:\n\
         - Due dates (more urgent dates are higher priority)\n\
         - Current status\n\
         - Task content and importance\n\
         \n\
         {}\n\
         \n\
         Additional context: {}\n\
         \n\
         Provide your response as a numbered list of tasks in recommended priority order,\n\
         with a brief explanation for each prioritization decision.",
        tasks_text, context
    )
}

/// Removes a surrounding Markdown code fence, with or without a `json` tag.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let inner = if let Some((_, rest)) = text.split_once("```json") {
        rest
    } else if let Some((_, rest)) = text.split_once("```") {
        rest
    } else {
        return text;
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

fn unquote(raw: &str) -> &str {
    raw.trim().trim_end_matches(',').trim().trim_matches('"').trim_matches('\'').trim()
}

fn tags_from_text(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let list = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')).unwrap_or(raw);
    normalize_tags(list.split(',').map(|t| unquote(t).to_string()).collect())
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses a model response into a [`TaskSuggestion`].
///
/// Accepts a JSON object (optionally inside a code fence) and falls back to
/// `key: value` lines for responses that are not valid JSON. The response
/// must mention priority, tags and effort.
pub fn parse_suggestion(text: &str) -> Result<TaskSuggestion, AiError> {
    let body = strip_code_fence(text);

    let mut priority = None;
    let mut tags = None;
    let mut effort = None;
    let mut summary = None;

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for (key, value) in fields {
            match key.trim().to_lowercase().as_str() {
                "priority" => priority = Some(text_field(&value).unwrap_or_default()),
                "effort" => effort = Some(text_field(&value).unwrap_or_default()),
                "summary" => summary = text_field(&value),
                "tags" => {
                    tags = Some(match value {
                        Value::Array(items) => normalize_tags(items.iter().filter_map(text_field).collect()),
                        Value::String(s) => split_tags(&s),
                        _ => Vec::new(),
                    })
                }
                _ => {}
            }
        }
    } else {
        for line in body.lines() {
            let line = line.trim().trim_start_matches(['{', '-', '*']).trim_end_matches('}').trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match unquote(key).to_lowercase().as_str() {
                "priority" => priority = Some(unquote(value).to_string()),
                "effort" => effort = Some(unquote(value).to_string()),
                "summary" => summary = Some(unquote(value).to_string()),
                "tags" => tags = Some(tags_from_text(value.trim().trim_end_matches(','))),
                _ => {}
            }
        }
    }

    match (priority, tags, effort) {
        (Some(priority), Some(tags), Some(effort)) => Ok(TaskSuggestion {
            priority: priority.parse().ok(),
            tags,
            effort: effort.parse().ok(),
            summary: summary.filter(|s| !s.is_empty()),
        }),
        _ => Err(AiError::InvalidResponse("expected priority, tags and effort".to_string())),
    }
}

/// Fills the fields the user left unset from `suggestion`.
///
/// Returns the names of the fields that were changed.
pub fn apply_suggestion(task: &mut Task, suggestion: &TaskSuggestion, priority_set: bool, tags_set: bool) -> Vec<&'static str> {
    let mut applied = Vec::new();
    if !priority_set {
        if let Some(priority) = suggestion.priority {
            task.priority = priority;
            applied.push("priority");
        }
    }
    if !tags_set && !suggestion.tags.is_empty() {
        task.tags = normalize_tags(suggestion.tags.clone());
        applied.push("tags");
    }
    applied
}

/// API key from `GEMINI_API_KEY`, or from the encrypted secret file (prompting once).
pub fn resolve_api_key() -> anyhow::Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }
    Secret::new(AI_SECRET_FILE_NAME, &Message::PromptAiApiKey.to_string()).get_or_prompt()
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: AiConfig,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig, api_key: String) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            api_key,
        }
    }

    /// Client for the configured endpoint (or the defaults) with the resolved API key.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let ai = config.ai.clone().unwrap_or_default();
        Ok(Self::new(&ai, resolve_api_key()?))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.api_url.trim_end_matches('/'), self.config.model)
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        tracing::debug!(model = %self.config.model, "sending generateContent request");

        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status: status.as_u16(), body });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AiError::InvalidResponse("empty response".to_string()));
        }
        Ok(text)
    }
}

impl SuggestionProvider for GeminiClient {
    async fn suggest(&self, description: &str) -> Result<TaskSuggestion, AiError> {
        check_description(description)?;
        let text = self.generate(&suggestion_prompt(description)).await?;
        parse_suggestion(&text)
    }

    async fn weekly_summary(&self, completed: &[Task], pending: &[Task]) -> Result<String, AiError> {
        if completed.is_empty() && pending.is_empty() {
            return Err(AiError::NothingToSummarize);
        }
        let text = self.generate(&summary_prompt(completed, pending)).await?;
        Ok(text.trim().to_string())
    }

    async fn improve(&self, title: &str, description: &str) -> Result<String, AiError> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AiError::TitleAndDescriptionRequired);
        }
        let text = self.generate(&improvement_prompt(title, description)).await?;
        Ok(text.trim().to_string())
    }

    async fn prioritize(&self, tasks: &[Task], context: &str) -> Result<String, AiError> {
        if tasks.is_empty() {
            return Err(AiError::NothingToPrioritize);
        }
        let text = self.generate(&prioritization_prompt(tasks, context)).await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\nplain\n```"), "plain");
        assert_eq!(strip_code_fence("  no fence "), "no fence");
    }

    #[test]
    fn bracketed_tag_lists_are_unquoted() {
        assert_eq!(tags_from_text("[\"ops\", 'infra', ops]"), vec!["ops", "infra"]);
        assert_eq!(tags_from_text("single"), vec!["single"]);
    }

    #[test]
    fn effort_accepts_synonyms() {
        assert_eq!("moderate".parse::<Effort>(), Ok(Effort::Medium));
        assert!("huge".parse::<Effort>().is_err());
    }
}
