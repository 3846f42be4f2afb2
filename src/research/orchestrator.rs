use crate::research::agents::{
    ContextDistiller, ConvergenceEvaluator, QueryPlanner, ReportSynthesizer,
};
use crate::research::context::ResearchContext;
use crate::research::extractor::extract_text;
use crate::research::normalizer::normalize;
use crate::research::types::{ResearchError, ResearchResult, ResearchState};
use crate::search::{RawSearchResult, Retrieved};
use crate::utils::text::char_len;

/// 原始条目作为候选上下文的最小字符数
const MIN_RAW_ITEM_CHARS: usize = 20;

/// 调研编排器 - 规划、迭代搜索与提炼、收敛判断、撰写报告
#[derive(Default)]
pub struct ResearchOrchestrator;

impl ResearchOrchestrator {
    /// 执行完整的调研流程
    ///
    /// 仅在启动前的凭证与迭代上限校验失败时返回错误；运行中任何协作方的失败都会被降级处理。
    pub async fn run(
        &self,
        context: &ResearchContext,
        query: &str,
        iteration_limit: usize,
    ) -> Result<ResearchResult, ResearchError> {
        let state = self.gather(context, query, iteration_limit).await?;
        Ok(self.write_report(context, query, state).await)
    }

    /// 规划与迭代阶段：返回累计的调研状态，不撰写报告
    pub async fn gather(
        &self,
        context: &ResearchContext,
        query: &str,
        iteration_limit: usize,
    ) -> Result<ResearchState, ResearchError> {
        context.config.ensure_credentials()?;
        if iteration_limit == 0 {
            return Err(ResearchError::InvalidIterationLimit(iteration_limit));
        }

        tracing::info!(query, iteration_limit, "starting research");
        let mut state = ResearchState::new();

        let mut batch = QueryPlanner.generate_initial_queries(context, query).await;
        if batch.is_empty() {
            batch = vec![query.to_string()];
        }
        state.record_queries(&batch);

        while state.iteration < iteration_limit {
            tracing::info!(
                iteration = state.iteration + 1,
                iteration_limit,
                queries = batch.len(),
                "research iteration started"
            );

            let mut iteration_contexts = Vec::new();
            for search_query in &batch {
                let raw = match context.search.search(search_query).await {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!(search_query = %search_query, error = %e, "search failed, skipping");
                        continue;
                    }
                };
                iteration_contexts.extend(
                    self.process_search_results(context, query, search_query, &raw)
                        .await,
                );
            }

            tracing::info!(
                iteration = state.iteration + 1,
                added = iteration_contexts.len(),
                "research iteration finished"
            );
            state.aggregated_contexts.extend(iteration_contexts);
            state.iteration += 1;

            if state.iteration >= iteration_limit {
                break;
            }

            let next = ConvergenceEvaluator
                .plan_next(
                    context,
                    query,
                    &state.query_texts(),
                    &state.aggregated_contexts,
                )
                .await;
            if next.is_empty() {
                tracing::info!(iteration = state.iteration, "no further research needed");
                break;
            }
            state.record_queries(&next);
            batch = next;
        }

        tracing::info!(
            iterations = state.iteration,
            contexts = state.aggregated_contexts.len(),
            "research gathering completed"
        );
        Ok(state)
    }

    /// 撰写阶段：基于累计的上下文生成报告并产出最终结果
    pub async fn write_report(
        &self,
        context: &ResearchContext,
        query: &str,
        state: ResearchState,
    ) -> ResearchResult {
        let report = ReportSynthesizer
            .synthesize(context, query, &state.aggregated_contexts)
            .await;
        state.into_result(report)
    }

    /// 将一次搜索的结果转为上下文片段：优先使用高亮，没有高亮时退化为足够长的原始条目
    async fn process_search_results(
        &self,
        context: &ResearchContext,
        query: &str,
        search_query: &str,
        raw: &RawSearchResult,
    ) -> Vec<String> {
        if raw.is_empty() {
            tracing::debug!(search_query, "empty search result");
            return Vec::new();
        }

        let normalized = normalize(raw);
        let mut candidates: Vec<Retrieved> = normalized
            .highlights
            .into_iter()
            .filter(|highlight| !highlight.trim().is_empty())
            .map(Retrieved::Text)
            .collect();

        if candidates.is_empty() {
            let items: &[Retrieved] = match raw {
                RawSearchResult::Items(items) => items,
                RawSearchResult::Single(Retrieved::List(items)) => items,
                _ => &[],
            };
            candidates = items
                .iter()
                .filter(|item| char_len(&extract_text(item)) > MIN_RAW_ITEM_CHARS)
                .cloned()
                .collect();
            tracing::debug!(
                search_query,
                candidates = candidates.len(),
                "no highlights, using raw items"
            );
        }

        let mut contexts = Vec::new();
        for candidate in &candidates {
            if context.config.research.relevance_filter
                && !ContextDistiller
                    .is_page_useful(context, query, candidate)
                    .await
            {
                tracing::debug!(search_query, "candidate judged not useful");
                continue;
            }

            let distilled = ContextDistiller
                .distill(context, query, search_query, candidate)
                .await;
            if !distilled.trim().is_empty() {
                contexts.push(distilled);
            }
        }
        contexts
    }
}
