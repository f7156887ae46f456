#[cfg(test)]
mod tests {
    use crate::config::{
        CacheConfig, Config, LLMConfig, LLMProvider, OutputFormat, ResearchConfig, SearchConfig,
    };
    use crate::i18n::TargetLanguage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.target_language, TargetLanguage::English);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.output_path.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        assert_eq!(LLMProvider::default(), LLMProvider::Gemini);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!("openai".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
        assert_eq!(
            "Anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!("GEMINI".parse::<LLMProvider>().unwrap(), LLMProvider::Gemini);
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!("ollama".parse::<LLMProvider>().unwrap(), LLMProvider::Ollama);

        assert!("moonshot".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display_roundtrip() {
        for provider in [
            LLMProvider::OpenAI,
            LLMProvider::Anthropic,
            LLMProvider::Gemini,
            LLMProvider::DeepSeek,
            LLMProvider::OpenRouter,
            LLMProvider::Ollama,
        ] {
            assert_eq!(
                provider.to_string().parse::<LLMProvider>().unwrap(),
                provider
            );
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::Gemini);
        // api_key may be empty if env var is not set
        assert!(!config.model_efficient.is_empty());
        assert!(!config.model_powerful.is_empty());
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay_ms, 2000);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();

        assert_eq!(config.api_base_url, "https://api.firecrawl.dev");
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_research_config_default() {
        let config = ResearchConfig::default();

        assert_eq!(config.max_tools, 5);
        assert_eq!(config.extraction_results, 5);
        assert_eq!(config.extraction_snippet_chars, 1000);
        assert_eq!(
            config.article_query_suffix,
            "tools comparison for best alternative"
        );
    }

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();

        assert!(config.enabled);
        assert_eq!(config.cache_dir, PathBuf::from(".scout/cache"));
        assert_eq!(config.expire_hours, 24);
    }

    #[test]
    fn test_from_file_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scout.toml");
        std::fs::write(
            &path,
            r#"
target_language = "de"
output_format = "json"

[llm]
provider = "openai"
model_efficient = "gpt-4o-mini"

[research]
max_tools = 3
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model_efficient, "gpt-4o-mini");
        // untouched keys keep their defaults
        assert_eq!(config.llm.temperature, 0.1);
        assert_eq!(config.research.max_tools, 3);
        assert_eq!(config.research.extraction_snippet_chars, 1000);
        assert_eq!(config.target_language, TargetLanguage::German);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "[llm\nprovider = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(&path, "verbose = true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::default();
        config.research.max_tools = 2;
        config.output_path = Some(PathBuf::from("report.md"));

        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.research.max_tools, 2);
        assert_eq!(parsed.output_path, Some(PathBuf::from("report.md")));
    }
}
