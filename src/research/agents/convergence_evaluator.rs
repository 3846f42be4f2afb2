use crate::research::agents::{AgentType, PromptTemplate};
use crate::research::context::ResearchContext;
use crate::research::parser::parse_query_list;
use crate::utils::text::truncate_chars;

/// 收敛评估员 - 判断是否需要继续调研，需要时给出新的搜索词
#[derive(Default)]
pub struct ConvergenceEvaluator;

impl ConvergenceEvaluator {
    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a systematic research planner.".to_string(),
            closing_instruction: "You are an analytical research assistant. Based on the original \
                query, the search queries performed so far, and the extracted contexts from webpages, \
                determine if further research is needed. If further research is needed, provide up \
                to four new search queries as a list (for example, ['new query1', 'new query2']). \
                If you believe no further research is needed, respond with an empty string.\n\
                Output only a list or the empty string without any additional text."
                .to_string(),
        }
    }

    /// 规划下一轮搜索词；空列表表示停止
    pub async fn plan_next(
        &self,
        context: &ResearchContext,
        query: &str,
        previous_queries: &[String],
        contexts: &[String],
    ) -> Vec<String> {
        let combined = contexts.join("\n");
        let previous = serde_json::to_string(previous_queries).unwrap_or_default();
        let body = format!(
            "User Query: {}\nPrevious Search Queries: {}\n\nExtracted Relevant Contexts:\n{}",
            query,
            previous,
            truncate_chars(&combined, context.config.research.evaluation_context_chars)
        );
        let messages = self.prompt_template().messages(&body);

        let response = match context.llm.complete(&messages).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(agent = %AgentType::ConvergenceEvaluator, error = %e, "follow-up planning failed");
                return Vec::new();
            }
        };

        let Some(text) = response.text_content() else {
            tracing::info!(agent = %AgentType::ConvergenceEvaluator, "no follow-up queries returned");
            return Vec::new();
        };

        let queries = parse_query_list(text).into_queries();
        if queries.is_empty() {
            tracing::info!(agent = %AgentType::ConvergenceEvaluator, "research judged complete");
        } else {
            tracing::info!(
                agent = %AgentType::ConvergenceEvaluator,
                count = queries.len(),
                "planned follow-up queries"
            );
        }
        queries
    }
}
