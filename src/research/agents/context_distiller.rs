//! 上下文提炼 - 从单个检索结果中提取与用户问题相关的信息

use crate::research::agents::{AgentType, PromptTemplate};
use crate::research::context::ResearchContext;
use crate::research::extractor::extract_text;
use crate::search::Retrieved;
use crate::utils::text::{char_len, truncate_chars};

/// 上下文提炼员
#[derive(Default)]
pub struct ContextDistiller;

impl ContextDistiller {
    fn distill_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are an expert in extracting and summarizing relevant information."
                .to_string(),
            closing_instruction: "You are an expert information extractor. Given the user's query, \
                the search query that led to this page, and the webpage content, extract all pieces \
                of information that are relevant to answering the user's query. Return only the \
                relevant context as plain text without commentary."
                .to_string(),
        }
    }

    fn relevance_template(&self) -> PromptTemplate {
        PromptTemplate {
            system_prompt: "You are a strict and concise evaluator of research relevance."
                .to_string(),
            closing_instruction: "You are a critical research evaluator. Given the user's query \
                and the content of a webpage, determine if the webpage contains information relevant \
                and useful for addressing the query. Respond with exactly one word: 'Yes' if the \
                page is useful, or 'No' if it is not. Do not include any extra text."
                .to_string(),
        }
    }

    /// 提炼相关上下文
    ///
    /// 短文本视为已提炼，原样返回且不调用模型；模型响应形态不可识别时返回截断后的文本；
    /// 模型调用失败时，文本输入返回原文，其他形态返回空串。
    pub async fn distill(
        &self,
        context: &ResearchContext,
        query: &str,
        search_query: &str,
        page: &Retrieved,
    ) -> String {
        let config = &context.config.research;
        let text = extract_text(page);
        if char_len(&text) < config.short_text_threshold {
            return text;
        }

        let excerpt = truncate_chars(&text, config.page_excerpt_chars);
        let body = format!(
            "User Query: {}\nSearch Query: {}\n\nWebpage Content (first {} characters):\n{}",
            query, search_query, config.page_excerpt_chars, excerpt
        );
        let messages = self.distill_template().messages(&body);

        match context.llm.complete(&messages).await {
            Ok(response) => match response.text_content() {
                Some(distilled) => distilled.to_string(),
                None => {
                    tracing::warn!(agent = %AgentType::ContextDistiller, "unexpected response shape, keeping truncated text");
                    excerpt.to_string()
                }
            },
            Err(e) => {
                tracing::error!(agent = %AgentType::ContextDistiller, error = %e, "context extraction failed");
                match page {
                    Retrieved::Text(original) => original.clone(),
                    _ => String::new(),
                }
            }
        }
    }

    /// 判断页面是否对回答问题有用；短文本直接视为有用，模型失败视为无用
    pub async fn is_page_useful(
        &self,
        context: &ResearchContext,
        query: &str,
        page: &Retrieved,
    ) -> bool {
        let config = &context.config.research;
        let text = extract_text(page);
        if char_len(&text) < config.short_text_threshold {
            return true;
        }

        let body = format!(
            "User Query: {}\n\nWebpage Content (first {} characters):\n{}",
            query,
            config.page_excerpt_chars,
            truncate_chars(&text, config.page_excerpt_chars)
        );
        let messages = self.relevance_template().messages(&body);

        match context.llm.complete(&messages).await {
            Ok(response) => response
                .text_content()
                .is_some_and(|answer| answer.to_lowercase().contains("yes")),
            Err(e) => {
                tracing::error!(agent = %AgentType::RelevanceJudge, error = %e, "relevance check failed");
                false
            }
        }
    }
}
