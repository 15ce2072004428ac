//! Application configuration stored as `config.json` in the data directory.
//!
//! A missing file is not an error: [`Config::read`] falls back to defaults
//! (JSON storage in the data directory, AI assistant disabled).

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_AI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Json => write!(f, "json"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Explicit store file. Defaults to a file in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "storage".to_string(),
            name: "Storage".to_string(),
        }
    }

    pub fn init(config: &StorageConfig) -> Result<Self> {
        msg_print!(Message::ConfigModuleStorage);

        let backends = [StorageBackend::Json, StorageBackend::Sqlite];
        let default_index = backends.iter().position(|b| *b == config.backend).unwrap_or(0);
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStorageBackend.to_string())
            .items(&backends)
            .default(default_index)
            .interact()?;

        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStoragePath.to_string())
            .default(config.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(Self {
            backend: backends[selected],
            path: Some(path.trim()).filter(|p| !p.is_empty()).map(PathBuf::from),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AiConfig {
    pub api_url: String,
    pub model: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_AI_API_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
        }
    }
}

impl AiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "ai".to_string(),
            name: "AI assistant".to_string(),
        }
    }

    pub fn init(config: &Option<AiConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleAi);

        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            model: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptAiModel.to_string())
                .default(config.model)
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup wizard. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [StorageConfig::module(), AiConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "storage" => config.storage = StorageConfig::init(&config.storage)?,
                "ai" => config.ai = Some(AiConfig::init(&config.ai)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
