//! 单元测试用的协作方替身

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::Config;
use crate::llm::{ChatMessage, LanguageModel, ModelResponse};
use crate::research::context::ResearchContext;
use crate::search::{RawSearchResult, WebSearch};

/// 由闭包决定响应的模型替身，记录调用次数
pub struct FnModel<F> {
    handler: F,
    calls: AtomicUsize,
}

impl<F> FnModel<F>
where
    F: Fn(&[ChatMessage]) -> Result<ModelResponse> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> LanguageModel for FnModel<F>
where
    F: Fn(&[ChatMessage]) -> Result<ModelResponse> + Send + Sync,
{
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ModelResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(messages)
    }
}

/// 由闭包决定结果的搜索替身
pub struct FnSearch<F> {
    handler: F,
    calls: AtomicUsize,
}

impl<F> FnSearch<F>
where
    F: Fn(&str) -> Result<RawSearchResult> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> WebSearch for FnSearch<F>
where
    F: Fn(&str) -> Result<RawSearchResult> + Send + Sync,
{
    async fn search(&self, query: &str) -> Result<RawSearchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(query)
    }
}

/// 带有测试凭证的配置
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.llm.api_key = "test-llm-key".to_string();
    config.search.api_key = "test-search-key".to_string();
    config
}

/// 用给定的模型替身与一个总是失败的搜索替身构建上下文
pub fn context_with_model(llm: Arc<dyn LanguageModel>) -> ResearchContext {
    let search = Arc::new(FnSearch::new(|_: &str| Err(anyhow!("search disabled in test"))));
    ResearchContext::new(test_config(), llm, search)
}

/// 用户消息（最后一条）的文本
pub fn user_text(messages: &[ChatMessage]) -> &str {
    messages
        .last()
        .map(|message| message.text.as_str())
        .unwrap_or_default()
}

/// 系统消息（第一条）的文本
pub fn system_text(messages: &[ChatMessage]) -> &str {
    messages
        .first()
        .map(|message| message.text.as_str())
        .unwrap_or_default()
}
