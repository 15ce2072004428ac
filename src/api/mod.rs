//! Clients for external services.
//!
//! Currently a single integration: the Gemini-backed AI assistant that
//! suggests priorities and tags for new tasks and writes weekly summaries.

pub mod ai;

pub use ai::{AiError, GeminiClient, SuggestionProvider, TaskSuggestion};
