//! Exa搜索客户端

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SearchConfig;
use crate::search::{RawSearchResult, Retrieved, WebSearch};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    num_results: u32,
    contents: ExaContents,
}

#[derive(Serialize)]
struct ExaContents {
    highlights: bool,
}

#[derive(Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Deserialize)]
struct ExaResult {
    url: String,
    #[serde(default)]
    highlights: Option<Vec<String>>,
}

/// 基于Exa `/search` 接口的网页搜索实现
#[derive(Clone)]
pub struct ExaSearchClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl ExaSearchClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client for web search")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.api_base_url.trim_end_matches('/'))
    }
}

/// 将单条结果渲染为带标记的来源片段
fn render_source(result: &ExaResult) -> String {
    let highlights = match &result.highlights {
        Some(highlights) if !highlights.is_empty() => {
            serde_json::to_string(highlights).unwrap_or_default()
        }
        _ => "No highlights".to_string(),
    };
    format!(
        "<source>\n    <url>{}</url>\n    <highlights>{}</highlights>\n</source>\n",
        result.url, highlights
    )
}

#[async_trait]
impl WebSearch for ExaSearchClient {
    async fn search(&self, query: &str) -> Result<RawSearchResult> {
        let request = ExaSearchRequest {
            query,
            num_results: self.config.num_results,
            contents: ExaContents { highlights: true },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("web search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("web search returned status {}: {}", status, body));
        }

        let payload: ExaSearchResponse = response
            .json()
            .await
            .context("Failed to decode web search response")?;

        tracing::debug!(query, results = payload.results.len(), "web search finished");

        Ok(RawSearchResult::Items(
            payload
                .results
                .iter()
                .map(|result| Retrieved::Text(render_source(result)))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_source_with_highlights() {
        let result = ExaResult {
            url: "https://example.com/cpi".to_string(),
            highlights: Some(vec!["CPI rose 0.3%".to_string(), "core steady".to_string()]),
        };
        let rendered = render_source(&result);
        assert!(rendered.contains("<url>https://example.com/cpi</url>"));
        assert!(rendered.contains(r#"<highlights>["CPI rose 0.3%","core steady"]</highlights>"#));
    }

    #[test]
    fn test_render_source_without_highlights() {
        let result = ExaResult {
            url: "https://example.com".to_string(),
            highlights: None,
        };
        assert!(render_source(&result).contains("<highlights>No highlights</highlights>"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = ExaSearchClient::new(SearchConfig {
            api_base_url: "https://api.exa.ai/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "https://api.exa.ai/search");
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let payload: ExaSearchResponse =
            serde_json::from_str(r#"{"results":[{"url":"https://a.b"}]}"#).unwrap();
        assert_eq!(payload.results.len(), 1);
        assert!(payload.results[0].highlights.is_none());

        let empty: ExaSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.results.is_empty());
    }
}
