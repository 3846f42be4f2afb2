//! 文本提取 - 将任意检索对象尽力转换为纯文本，不会失败

use serde_json::Value;

use crate::search::Retrieved;

/// 获取检索对象的最佳纯文本表示
///
/// 顺序：文本原样返回 → 文档正文属性 → 记录的`content`/`text`字段 →
/// 全为文本的列表按行拼接 → 通用字符串形式。
pub fn extract_text(retrieved: &Retrieved) -> String {
    match retrieved {
        Retrieved::Text(text) => text.clone(),
        Retrieved::Document { text, .. } => text.clone(),
        Retrieved::Record(map) => map
            .get("content")
            .and_then(Value::as_str)
            .or_else(|| map.get("text").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| retrieved.to_string()),
        Retrieved::List(items) => {
            let texts: Option<Vec<&str>> = items
                .iter()
                .map(|item| match item {
                    Retrieved::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            match texts {
                Some(texts) => texts.join("\n"),
                None => retrieved.to_string(),
            }
        }
        Retrieved::Opaque(_) => retrieved.to_string(),
    }
}
