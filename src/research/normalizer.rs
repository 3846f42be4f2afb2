//! 搜索结果规范化 - 将各种形态的原始结果统一为 {urls, highlights}

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::research::extractor::extract_text;
use crate::research::parser::quoted_substrings;
use crate::search::{NormalizedResults, RawSearchResult, Retrieved};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<url>(.*?)</url>").expect("valid url pattern"));

static HIGHLIGHTS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<highlights>(.*?)</highlights>").expect("valid highlights pattern")
});

static BRACKET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[(.*?)\]").expect("valid bracket pattern"));

/// 规范化原始搜索结果；已是规范形态（包括带`urls`与`highlights`字符串数组的记录）时原样返回
pub fn normalize(raw: &RawSearchResult) -> NormalizedResults {
    if let RawSearchResult::Single(Retrieved::Record(map)) = raw
        && let Some(results) = as_normalized(map)
    {
        return results;
    }

    let blob = match raw {
        RawSearchResult::Normalized(results) => return results.clone(),
        RawSearchResult::Items(items) => concat_items(items),
        RawSearchResult::Single(Retrieved::List(items)) => concat_items(items),
        RawSearchResult::Single(item) => extract_text(item),
    };

    let results = scan_blob(&blob);
    tracing::debug!(
        urls = results.urls.len(),
        highlights = results.highlights.len(),
        "normalized search results"
    );
    results
}

/// 识别已是规范形态的记录：`urls`与`highlights`都必须是字符串数组
fn as_normalized(map: &Map<String, Value>) -> Option<NormalizedResults> {
    Some(NormalizedResults {
        urls: string_array(map.get("urls")?)?,
        highlights: string_array(map.get("highlights")?)?,
    })
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn concat_items(items: &[Retrieved]) -> String {
    items
        .iter()
        .map(extract_text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 扫描文本中的<url>与<highlights>标记；没有标记内的高亮时，退化为扫描方括号内的引号子串
fn scan_blob(blob: &str) -> NormalizedResults {
    let urls = URL_PATTERN
        .captures_iter(blob)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    let mut highlights: Vec<String> = HIGHLIGHTS_PATTERN
        .captures_iter(blob)
        .filter_map(|captures| captures.get(1))
        .flat_map(|m| quoted_substrings(m.as_str()))
        .collect();

    if highlights.is_empty() {
        highlights = BRACKET_PATTERN
            .captures_iter(blob)
            .filter_map(|captures| captures.get(1))
            .flat_map(|m| quoted_substrings(m.as_str()))
            .collect();
    }

    NormalizedResults { urls, highlights }
}
