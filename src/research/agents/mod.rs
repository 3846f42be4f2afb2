use std::fmt::Display;

use crate::llm::ChatMessage;

pub mod context_distiller;
pub mod convergence_evaluator;
pub mod query_planner;
pub mod report_synthesizer;

pub use context_distiller::ContextDistiller;
pub use convergence_evaluator::ConvergenceEvaluator;
pub use query_planner::QueryPlanner;
pub use report_synthesizer::ReportSynthesizer;

/// 调研智能体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    QueryPlanner,
    RelevanceJudge,
    ContextDistiller,
    ConvergenceEvaluator,
    ReportSynthesizer,
}

impl Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentType::QueryPlanner => "query planner",
            AgentType::RelevanceJudge => "relevance judge",
            AgentType::ContextDistiller => "context distiller",
            AgentType::ConvergenceEvaluator => "convergence evaluator",
            AgentType::ReportSynthesizer => "report synthesizer",
        };
        write!(f, "{}", name)
    }
}

/// 提示词模板：系统提示 + 用户消息主体 + 收尾指令
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub system_prompt: String,
    pub closing_instruction: String,
}

impl PromptTemplate {
    /// 组装两条消息：系统消息在前，用户消息为`{body}\n\n{closing_instruction}`
    pub fn messages(&self, body: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(format!("{}\n\n{}", body, self.closing_instruction)),
        ]
    }
}
