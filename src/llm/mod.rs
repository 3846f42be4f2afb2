//! 大模型协作方边界 - 调研核心只依赖这里定义的trait与消息类型

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod client;

/// 消息角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// 发送给模型的一条消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// 模型响应的有限形态集合，由协作方适配器产生，下游按形态穷举匹配
#[derive(Debug, Clone, PartialEq)]
pub enum ModelResponse {
    /// 纯文本
    Text(String),
    /// 键值结构，正文通常位于`content`字段
    Structured(Map<String, Value>),
    /// 内容块列表
    List(Vec<Value>),
}

impl ModelResponse {
    /// 提取可用的正文（已去除首尾空白）；形态不可识别或正文为空时返回None
    pub fn text_content(&self) -> Option<&str> {
        let text = match self {
            ModelResponse::Text(text) => Some(text.as_str()),
            ModelResponse::Structured(map) => map
                .get("content")
                .and_then(Value::as_str)
                .or_else(|| map.get("text").and_then(Value::as_str)),
            ModelResponse::List(_) => None,
        };
        text.map(str::trim).filter(|t| !t.is_empty())
    }
}

/// 大模型协作方
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 发送有序消息列表，返回模型响应；网络、配额、超时等错误以Err返回
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ModelResponse>;
}
