use crate::research::agents::convergence_evaluator::ConvergenceEvaluator;
use crate::research::agents::{AgentType, PromptTemplate};
use crate::research::context::ResearchContext;
use crate::research::parser::{QueryListParse, parse_query_list};

/// 搜索词规划员 - 将用户问题拆解为最多四个精确的搜索词
#[derive(Default)]
pub struct QueryPlanner;

impl QueryPlanner {
    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a helpful and precise research assistant.".to_string(),
            closing_instruction: "You are an expert research assistant. Given the user's query, \
                generate up to four distinct, precise search queries that would help gather \
                comprehensive information on the topic. Return only a list of quoted strings, \
                for example: ['query1', 'query2', 'query3']."
                .to_string(),
        }
    }

    /// 生成初始搜索词；任何失败都退化为以原始问题作为唯一搜索词，结果永不为空
    pub async fn generate_initial_queries(
        &self,
        context: &ResearchContext,
        query: &str,
    ) -> Vec<String> {
        let messages = self
            .prompt_template()
            .messages(&format!("User Query: {}", query));

        let response = match context.llm.complete(&messages).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(agent = %AgentType::QueryPlanner, error = %e, "query generation failed");
                return vec![query.to_string()];
            }
        };

        let Some(text) = response.text_content() else {
            tracing::warn!(agent = %AgentType::QueryPlanner, "unexpected response shape");
            return vec![query.to_string()];
        };

        match parse_query_list(text) {
            QueryListParse::Parsed(queries) | QueryListParse::Fallback(queries) => {
                tracing::info!(agent = %AgentType::QueryPlanner, count = queries.len(), "generated initial queries");
                queries
            }
            QueryListParse::Empty | QueryListParse::Unrecognized => {
                tracing::warn!(agent = %AgentType::QueryPlanner, "could not parse queries from model output");
                vec![query.to_string()]
            }
        }
    }

    /// 生成后续搜索词；返回空列表表示无需继续调研
    pub async fn generate_followup_queries(
        &self,
        context: &ResearchContext,
        query: &str,
        previous_queries: &[String],
        contexts: &[String],
    ) -> Vec<String> {
        ConvergenceEvaluator
            .plan_next(context, query, previous_queries, contexts)
            .await
    }
}
