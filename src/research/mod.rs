//! 迭代式网络调研
//!
//! 流程：规划初始搜索词 → 按轮次搜索并提炼上下文 → 评估是否需要继续 → 撰写报告。
//! 两个外部协作方（大模型与搜索服务）通过[`ResearchContext`]注入，核心逻辑不依赖具体实现。

use anyhow::Result;

use crate::config::Config;

pub mod agents;
pub mod context;
pub mod extractor;
pub mod normalizer;
pub mod orchestrator;
pub mod parser;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::ResearchContext;
pub use orchestrator::ResearchOrchestrator;
pub use types::{ResearchError, ResearchResult};

/// 使用默认协作方执行一次调研，迭代次数按配置上限截断
pub async fn run_research(
    config: &Config,
    query: &str,
    iterations: usize,
) -> Result<ResearchResult> {
    config.research_iteration_limit(iterations)?;
    let context = ResearchContext::from_config(config.clone())?;
    Ok(research_with(&context, query, iterations).await?)
}

/// 使用给定协作方执行一次调研，迭代次数按配置上限截断
pub async fn research_with(
    context: &ResearchContext,
    query: &str,
    iterations: usize,
) -> Result<ResearchResult, ResearchError> {
    let iteration_limit = context.config.research_iteration_limit(iterations)?;
    ResearchOrchestrator.run(context, query, iteration_limit).await
}
