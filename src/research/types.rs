use serde::{Deserialize, Serialize};

/// 调研核心对调用方暴露的错误，仅限启动前的配置问题
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResearchError {
    #[error("missing credential: {0} is not configured")]
    MissingCredential(String),
    #[error("iteration limit must be a positive integer, got {0}")]
    InvalidIterationLimit(usize),
}

/// 发送给搜索服务的一个搜索词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    /// 产生该搜索词的轮次，0表示初始规划
    pub origin_iteration: usize,
}

/// 单次调研运行内累积的进度，只由编排器在轮次边界修改
#[derive(Debug, Clone, Default)]
pub struct ResearchState {
    /// 累计的上下文片段，只追加不删除
    pub aggregated_contexts: Vec<String>,
    /// 已产生的全部搜索词，只追加不删除
    pub all_search_queries: Vec<SearchQuery>,
    /// 已执行的轮数
    pub iteration: usize,
}

impl ResearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一批新的搜索词
    pub fn record_queries(&mut self, queries: &[String]) {
        let origin_iteration = self.iteration;
        self.all_search_queries
            .extend(queries.iter().map(|text| SearchQuery {
                text: text.clone(),
                origin_iteration,
            }));
    }

    /// 全部搜索词文本，保持产生顺序
    pub fn query_texts(&self) -> Vec<String> {
        self.all_search_queries
            .iter()
            .map(|query| query.text.clone())
            .collect()
    }

    /// 生成最终结果
    pub fn into_result(self, report: String) -> ResearchResult {
        let search_queries = self.query_texts();
        ResearchResult {
            report,
            contexts: self.aggregated_contexts,
            search_queries,
            iterations: self.iteration,
        }
    }
}

/// 一次调研的最终输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub report: String,
    pub contexts: Vec<String>,
    pub search_queries: Vec<String>,
    /// 实际执行的轮数
    pub iterations: usize,
}
