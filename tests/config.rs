#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use taskdesk::libs::config::{AiConfig, Config, StorageBackend, StorageConfig, DEFAULT_AI_MODEL};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = temp_dir.path().join("taskdesk").join("config.json");
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert!(config.storage.path.is_none());
        assert!(config.ai.is_none());
        assert_eq!(AiConfig::default().model, DEFAULT_AI_MODEL);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_back(ctx: &mut ConfigTestContext) {
        let config = Config {
            storage: StorageConfig {
                backend: StorageBackend::Sqlite,
                path: Some(PathBuf::from("/tmp/tasks.db")),
            },
            ai: Some(AiConfig {
                api_url: "https://ai.example.com/v1".to_string(),
                model: "test-model".to_string(),
            }),
        };
        config.save_to(&ctx.config_path).unwrap();

        let content = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(content.contains("\"sqlite\""));
        assert_eq!(Config::read_from(&ctx.config_path).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_config_fills_defaults(ctx: &mut ConfigTestContext) {
        std::fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        std::fs::write(&ctx.config_path, r#"{"ai": {"api_url": "http://localhost:8080", "model": "local"}}"#).unwrap();

        let config = Config::read_from(&ctx.config_path).unwrap();
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.ai.unwrap().model, "local");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::create_dir_all(ctx.config_path.parent().unwrap()).unwrap();
        std::fs::write(&ctx.config_path, "storage = json").unwrap();
        assert!(Config::read_from(&ctx.config_path).is_err());
    }
}
