//! 报告撰写 - 将累计的上下文合成为最终报告，在任何失败下都产出非空报告

use crate::research::agents::{AgentType, PromptTemplate};
use crate::research::context::ResearchContext;
use crate::utils::text::{summarize_chars, truncate_chars};

const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";
const FINDING_SUMMARY_CHARS: usize = 100;

/// 未收集到任何上下文时的报告
pub fn insufficient_information_report(query: &str) -> String {
    format!(
        "Unable to generate a comprehensive report on '{}'. The research process did not find sufficient relevant information.",
        query
    )
}

/// 报告撰写员
#[derive(Default)]
pub struct ReportSynthesizer;

impl ReportSynthesizer {
    fn prompt_template(&self, context: &ResearchContext) -> PromptTemplate {
        let mut closing_instruction = "You are an expert researcher and report writer. Based on the \
            gathered contexts below and the original query, write a comprehensive, well-structured, \
            and detailed report that addresses the query thoroughly. Include all relevant insights \
            and conclusions without extraneous commentary. If the contexts don't directly address \
            the query, acknowledge this and provide the most relevant information available."
            .to_string();
        if let Some(language) = &context.config.target_language {
            closing_instruction.push_str("\n\n");
            closing_instruction.push_str(language.prompt_instruction());
        }

        PromptTemplate {
            system_prompt: "You are a skilled report writer.".to_string(),
            closing_instruction,
        }
    }

    /// 合成最终报告
    pub async fn synthesize(
        &self,
        context: &ResearchContext,
        query: &str,
        contexts: &[String],
    ) -> String {
        if contexts.is_empty() {
            tracing::warn!(agent = %AgentType::ReportSynthesizer, "no contexts gathered");
            return insufficient_information_report(query);
        }

        let config = &context.config.research;
        let combined = contexts
            .iter()
            .enumerate()
            .map(|(i, c)| format!("Context {}:\n{}", i + 1, c))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        let body = format!(
            "User Query: {}\n\nGathered Relevant Contexts:\n{}",
            query,
            truncate_chars(&combined, config.report_context_chars)
        );
        let messages = self.prompt_template(context).messages(&body);

        match context.llm.complete(&messages).await {
            Ok(response) => match response.text_content() {
                Some(report) => {
                    tracing::info!(agent = %AgentType::ReportSynthesizer, chars = report.len(), "report generated");
                    report.to_string()
                }
                None => {
                    tracing::warn!(agent = %AgentType::ReportSynthesizer, "unexpected response shape, building key findings report");
                    key_findings_report(query, contexts, config.fallback_findings_limit)
                }
            },
            Err(e) => {
                tracing::error!(agent = %AgentType::ReportSynthesizer, error = %e, "report generation failed");
                findings_report(query, contexts, config.fallback_findings_limit)
            }
        }
    }
}

/// 每条上下文只保留前100个字符的要点报告
fn key_findings_report(query: &str, contexts: &[String], limit: usize) -> String {
    let mut report = format!("# Research Report: {}\n\n## Key Findings\n\n", query);
    for (i, context) in contexts.iter().take(limit).enumerate() {
        report.push_str(&format!(
            "### Context {}:\n{}\n\n",
            i + 1,
            summarize_chars(context, FINDING_SUMMARY_CHARS)
        ));
    }
    report
}

/// 原样罗列上下文的报告
fn findings_report(query: &str, contexts: &[String], limit: usize) -> String {
    let mut report = format!("# Research Findings on: {}\n\n", query);
    for (i, context) in contexts.iter().take(limit).enumerate() {
        report.push_str(&format!("Finding {}:\n{}{}", i + 1, context, CONTEXT_SEPARATOR));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TargetLanguage;
    use crate::llm::ModelResponse;
    use crate::research::test_support::{FnModel, context_with_model, user_text};
    use anyhow::anyhow;
    use serde_json::json;
    use std::sync::Arc;

    fn contexts(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("fact number {}", i)).collect()
    }

    #[tokio::test]
    async fn test_empty_contexts_make_no_model_call() {
        let model = Arc::new(FnModel::new(|_: &[_]| Ok(ModelResponse::Text("x".to_string()))));
        let context = context_with_model(model.clone());

        let report = ReportSynthesizer.synthesize(&context, "topic", &[]).await;
        assert_eq!(report, insufficient_information_report("topic"));
        assert!(report.contains("'topic'"));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_contexts_are_numbered_and_separated() {
        let model = Arc::new(FnModel::new(|messages: &[_]| {
            assert!(user_text(messages).contains(
                "Gathered Relevant Contexts:\nContext 1:\nfact number 1\n\n---\n\nContext 2:\nfact number 2"
            ));
            Ok(ModelResponse::Text("# Report\nbody".to_string()))
        }));
        let context = context_with_model(model);

        let report = ReportSynthesizer.synthesize(&context, "q", &contexts(2)).await;
        assert_eq!(report, "# Report\nbody");
    }

    #[tokio::test]
    async fn test_language_instruction_is_appended() {
        let model = Arc::new(FnModel::new(|messages: &[_]| {
            assert!(user_text(messages).ends_with(TargetLanguage::Chinese.prompt_instruction()));
            Ok(ModelResponse::Text("报告".to_string()))
        }));
        let mut context = context_with_model(model);
        context.config.target_language = Some(TargetLanguage::Chinese);

        let report = ReportSynthesizer.synthesize(&context, "q", &contexts(1)).await;
        assert_eq!(report, "报告");
    }

    #[tokio::test]
    async fn test_unrecognized_shape_builds_key_findings() {
        let model = Arc::new(FnModel::new(|_: &[_]| Ok(ModelResponse::List(vec![json!({})]))));
        let context = context_with_model(model);

        let mut gathered = contexts(12);
        gathered[0] = "y".repeat(150);
        let report = ReportSynthesizer.synthesize(&context, "q", &gathered).await;

        assert!(report.starts_with("# Research Report: q\n\n## Key Findings\n\n"));
        assert!(report.contains(&format!("### Context 1:\n{}...\n\n", "y".repeat(100))));
        assert!(report.contains("### Context 10:\nfact number 10\n\n"));
        assert!(!report.contains("Context 11"));
    }

    #[tokio::test]
    async fn test_model_error_builds_findings_listing() {
        let model = Arc::new(FnModel::new(|_: &[_]| Err(anyhow!("overloaded"))));
        let context = context_with_model(model);

        let report = ReportSynthesizer.synthesize(&context, "q", &contexts(11)).await;
        assert!(report.starts_with("# Research Findings on: q\n\nFinding 1:\nfact number 1\n\n---\n\n"));
        assert!(report.contains("Finding 10:\nfact number 10"));
        assert!(!report.contains("fact number 11"));
    }
}
