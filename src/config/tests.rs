#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMProvider, ResearchConfig, SearchConfig};
    use crate::i18n::TargetLanguage;
    use crate::research::ResearchError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn credentialed() -> Config {
        let mut config = Config::default();
        config.llm.api_key = "llm".to_string();
        config.search.api_key = "exa".to_string();
        config
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.model_efficient, "claude-3-5-sonnet-20240620");
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.search.api_base_url, "https://api.exa.ai");
        assert!(config.target_language.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_research_config_default() {
        let research = ResearchConfig::default();

        assert_eq!(research.default_iterations, 3);
        assert_eq!(research.max_iterations, 5);
        assert_eq!(research.short_text_threshold, 200);
        assert_eq!(research.page_excerpt_chars, 5000);
        assert_eq!(research.evaluation_context_chars, 10_000);
        assert_eq!(research.report_context_chars, 20_000);
        assert_eq!(research.fallback_findings_limit, 10);
        assert!(!research.relevance_filter);
    }

    #[test]
    fn test_search_config_default() {
        let search = SearchConfig::default();
        assert_eq!(search.num_results, 6);
        assert_eq!(search.timeout_seconds, 30);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!("openai".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
        assert_eq!(
            "Anthropic".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!("ollama".parse::<LLMProvider>().unwrap(), LLMProvider::Ollama);
        assert!("mistral".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Anthropic.to_string(), "anthropic");
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_clamp_iterations() {
        let research = ResearchConfig::default();

        assert_eq!(research.clamp_iterations(1), Ok(1));
        assert_eq!(research.clamp_iterations(3), Ok(3));
        assert_eq!(research.clamp_iterations(50), Ok(5));
        assert_eq!(
            research.clamp_iterations(0),
            Err(ResearchError::InvalidIterationLimit(0))
        );
    }

    #[test]
    fn test_research_iteration_limit() {
        let config = credentialed();
        assert_eq!(config.research_iteration_limit(2), Ok(2));
        assert_eq!(config.research_iteration_limit(9), Ok(5));

        let mut config = credentialed();
        config.search.api_key.clear();
        assert!(matches!(
            config.research_iteration_limit(2),
            Err(ResearchError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_ensure_credentials() {
        assert!(credentialed().ensure_credentials().is_ok());

        let mut config = credentialed();
        config.llm.api_key = "  ".to_string();
        assert!(matches!(
            config.ensure_credentials(),
            Err(ResearchError::MissingCredential(_))
        ));

        let mut config = credentialed();
        config.search.api_key.clear();
        assert!(matches!(
            config.ensure_credentials(),
            Err(ResearchError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_ollama_needs_no_llm_key() {
        let mut config = credentialed();
        config.llm.provider = LLMProvider::Ollama;
        config.llm.api_key.clear();
        assert!(config.ensure_credentials().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("research.toml");
        std::fs::write(
            &path,
            r#"
target_language = "zh"

[llm]
provider = "deepseek"
api_key = "from-file"
model_efficient = "deepseek-chat"

[search]
num_results = 4

[research]
relevance_filter = true
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.llm.provider, LLMProvider::DeepSeek);
        assert_eq!(config.llm.api_key, "from-file");
        assert_eq!(config.llm.model_efficient, "deepseek-chat");
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.search.num_results, 4);
        assert!(config.research.relevance_filter);
        assert_eq!(config.research.max_iterations, 5);
        assert_eq!(config.target_language, Some(TargetLanguage::Chinese));
    }

    #[test]
    fn test_from_file_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        std::fs::write(&path, "[research\nmax_iterations = ").unwrap();

        assert!(Config::from_file(&path).is_err());
        assert!(Config::from_file(&PathBuf::from("/nonexistent/research.toml")).is_err());
    }
}
