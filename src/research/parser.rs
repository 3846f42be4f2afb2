//! 模型输出中的搜索词列表解析
//!
//! 语法：
//! ```text
//! list    := '[' ws ( string ( ws ',' ws string )* ( ws ',' )? )? ws ']'
//! string  := '\'' chars '\'' | '"' chars '"'     (支持反斜杠转义)
//! ```
//! 先在文本中寻找第一个能按上述语法完整解析的方括号列表；找不到时退化为
//! 扫描所有被引号包裹的子串。

use regex::Regex;
use std::sync::LazyLock;

static QUOTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid quoted-substring pattern"));

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryListParse {
    /// 按列表语法解析成功（非空）
    Parsed(Vec<String>),
    /// 输入为空或只有空白
    Empty,
    /// 列表语法失败，通过引号子串扫描得到（非空）
    Fallback(Vec<String>),
    /// 什么也没提取到
    Unrecognized,
}

impl QueryListParse {
    /// 取出解析到的搜索词；Empty与Unrecognized均返回空列表
    pub fn into_queries(self) -> Vec<String> {
        match self {
            QueryListParse::Parsed(queries) | QueryListParse::Fallback(queries) => queries,
            QueryListParse::Empty | QueryListParse::Unrecognized => Vec::new(),
        }
    }
}

/// 解析模型返回的搜索词列表
pub fn parse_query_list(text: &str) -> QueryListParse {
    let text = text.trim();
    if text.is_empty() {
        return QueryListParse::Empty;
    }

    if let Some(queries) = find_list_literal(text) {
        return QueryListParse::Parsed(queries);
    }

    let quoted = quoted_substrings(text);
    if quoted.is_empty() {
        QueryListParse::Unrecognized
    } else {
        QueryListParse::Fallback(quoted)
    }
}

/// 提取所有被引号包裹的子串
pub fn quoted_substrings(text: &str) -> Vec<String> {
    QUOTED_PATTERN
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 从每个'['位置尝试解析，返回第一个非空的字符串列表
fn find_list_literal(text: &str) -> Option<Vec<String>> {
    text.char_indices()
        .filter(|(_, c)| *c == '[')
        .find_map(|(start, _)| {
            parse_list_at(&text[start..])
                .map(|items| {
                    items
                        .into_iter()
                        .map(|item| item.trim().to_string())
                        .filter(|item| !item.is_empty())
                        .collect::<Vec<_>>()
                })
                .filter(|items| !items.is_empty())
        })
}

/// 解析以'['开头的列表字面量
fn parse_list_at(input: &str) -> Option<Vec<String>> {
    let mut chars = input.chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek()? {
            ']' => return Some(items),
            '\'' | '"' => items.push(parse_string(&mut chars)?),
            _ => return None,
        }
        skip_whitespace(&mut chars);
        match chars.next()? {
            ',' => continue,
            ']' => return Some(items),
            _ => return None,
        }
    }
}

fn parse_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut value = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                other => value.push(other),
            },
            c if c == quote => return Some(value),
            c => value.push(c),
        }
    }
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}
