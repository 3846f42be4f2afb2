use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use deep_research::Config;
use deep_research::llm::{ChatMessage, LanguageModel, ModelResponse};
use deep_research::research::ResearchContext;
use deep_research::search::{NormalizedResults, RawSearchResult, WebSearch};

pub const PLANNER_SYSTEM: &str = "You are a helpful and precise research assistant.";
pub const EVALUATOR_SYSTEM: &str = "You are a systematic research planner.";
pub const WRITER_SYSTEM: &str = "You are a skilled report writer.";

/// 按系统提示分派应答的模型替身，记录每次调用的系统提示
pub struct ScriptedModel {
    answer: Box<dyn Fn(&str, &str) -> Result<ModelResponse> + Send + Sync>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new<F>(answer: F) -> Self
    where
        F: Fn(&str, &str) -> Result<ModelResponse> + Send + Sync + 'static,
    {
        Self {
            answer: Box::new(answer),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 每次调用的系统提示，按调用顺序
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, system: &str) -> usize {
        self.calls().iter().filter(|s| s.as_str() == system).count()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ModelResponse> {
        let system = messages.first().map(|m| m.text.clone()).unwrap_or_default();
        let user = messages.last().map(|m| m.text.clone()).unwrap_or_default();
        self.calls.lock().unwrap().push(system.clone());
        (self.answer)(&system, &user)
    }
}

/// 搜索替身，记录每次的搜索词
pub struct ScriptedSearch {
    answer: Box<dyn Fn(&str) -> Result<RawSearchResult> + Send + Sync>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn new<F>(answer: F) -> Self
    where
        F: Fn(&str) -> Result<RawSearchResult> + Send + Sync + 'static,
    {
        Self {
            answer: Box::new(answer),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<RawSearchResult> {
        self.queries.lock().unwrap().push(query.to_string());
        (self.answer)(query)
    }
}

pub fn text(answer: &str) -> Result<ModelResponse> {
    Ok(ModelResponse::Text(answer.to_string()))
}

pub fn highlights_for(query: &str) -> RawSearchResult {
    RawSearchResult::Normalized(NormalizedResults {
        urls: vec![format!("https://example.com/{}", query.replace(' ', "-"))],
        highlights: vec![format!("finding for {}", query)],
    })
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.api_key = "test-llm-key".to_string();
    config.search.api_key = "test-search-key".to_string();
    config
}

pub fn context(model: Arc<ScriptedModel>, search: Arc<ScriptedSearch>) -> ResearchContext {
    ResearchContext::new(test_config(), model, search)
}
