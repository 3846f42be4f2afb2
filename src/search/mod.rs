//! 网页搜索协作方边界

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod exa;

pub use exa::ExaSearchClient;

/// 规范化后的搜索结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResults {
    pub urls: Vec<String>,
    pub highlights: Vec<String>,
}

impl NormalizedResults {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.highlights.is_empty()
    }
}

/// 检索得到的任意对象
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieved {
    /// 纯文本
    Text(String),
    /// 自带正文属性的文档对象
    Document {
        text: String,
        metadata: Map<String, Value>,
    },
    /// 键值记录
    Record(Map<String, Value>),
    /// 对象列表
    List(Vec<Retrieved>),
    /// 其他无法识别的值
    Opaque(Value),
}

impl Retrieved {
    /// 转换为JSON值，用于生成通用字符串形式
    pub fn to_value(&self) -> Value {
        match self {
            Retrieved::Text(text) => Value::String(text.clone()),
            Retrieved::Document { text, metadata } => {
                let mut map = Map::new();
                map.insert("text".to_string(), Value::String(text.clone()));
                map.insert("metadata".to_string(), Value::Object(metadata.clone()));
                Value::Object(map)
            }
            Retrieved::Record(map) => Value::Object(map.clone()),
            Retrieved::List(items) => Value::Array(items.iter().map(Retrieved::to_value).collect()),
            Retrieved::Opaque(value) => value.clone(),
        }
    }
}

/// 通用字符串形式：文本原样输出，其余对象输出为JSON
impl std::fmt::Display for Retrieved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Retrieved::Text(text) => write!(f, "{}", text),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

impl From<Value> for Retrieved {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Retrieved::Text(text),
            Value::Object(map) => Retrieved::Record(map),
            Value::Array(items) => {
                Retrieved::List(items.into_iter().map(Retrieved::from).collect())
            }
            other => Retrieved::Opaque(other),
        }
    }
}

impl From<&str> for Retrieved {
    fn from(text: &str) -> Self {
        Retrieved::Text(text.to_string())
    }
}

impl From<String> for Retrieved {
    fn from(text: String) -> Self {
        Retrieved::Text(text)
    }
}

/// 搜索服务对单个搜索词的原始响应
#[derive(Debug, Clone, PartialEq)]
pub enum RawSearchResult {
    /// 已经是规范化形态
    Normalized(NormalizedResults),
    /// 多条结果
    Items(Vec<Retrieved>),
    /// 单个对象
    Single(Retrieved),
}

impl RawSearchResult {
    /// 是否没有任何可处理的内容
    pub fn is_empty(&self) -> bool {
        match self {
            RawSearchResult::Normalized(results) => results.is_empty(),
            RawSearchResult::Items(items) => items.is_empty(),
            RawSearchResult::Single(Retrieved::Text(text)) => text.trim().is_empty(),
            RawSearchResult::Single(Retrieved::List(items)) => items.is_empty(),
            RawSearchResult::Single(Retrieved::Record(map)) => map.is_empty(),
            RawSearchResult::Single(Retrieved::Opaque(Value::Null)) => true,
            RawSearchResult::Single(_) => false,
        }
    }
}

/// 网页搜索协作方
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// 执行一次搜索；失败或空结果都由调用方容错处理
    async fn search(&self, query: &str) -> Result<RawSearchResult>;
}
