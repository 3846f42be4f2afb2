use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::llm::{LanguageModel, client::LLMClient};
use crate::search::{ExaSearchClient, WebSearch};

/// 调研上下文：两个外部协作方与配置
#[derive(Clone)]
pub struct ResearchContext {
    /// 大模型协作方
    pub llm: Arc<dyn LanguageModel>,
    /// 网页搜索协作方
    pub search: Arc<dyn WebSearch>,
    /// 配置
    pub config: Config,
}

impl ResearchContext {
    /// 使用给定的协作方创建上下文
    pub fn new(config: Config, llm: Arc<dyn LanguageModel>, search: Arc<dyn WebSearch>) -> Self {
        Self {
            llm,
            search,
            config,
        }
    }

    /// 按配置创建默认协作方（rig大模型客户端 + Exa搜索）
    pub fn from_config(config: Config) -> Result<Self> {
        let llm = Arc::new(LLMClient::new(config.llm.clone())?);
        let search = Arc::new(ExaSearchClient::new(config.search.clone())?);
        Ok(Self::new(config, llm, search))
    }
}
