use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::i18n::TargetLanguage;
use crate::research::ResearchError;

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    #[default]
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    #[serde(rename = "ollama")]
    Ollama,
}

impl LLMProvider {
    /// 该Provider是否需要API KEY（本地部署的Ollama不需要）
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, LLMProvider::Ollama)
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::DeepSeek => write!(f, "deepseek"),
            LLMProvider::Ollama => write!(f, "ollama"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" => Ok(LLMProvider::Anthropic),
            "deepseek" => Ok(LLMProvider::DeepSeek),
            "ollama" => Ok(LLMProvider::Ollama),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// 网页搜索配置
    pub search: SearchConfig,

    /// 调研流程配置
    pub research: ResearchConfig,

    /// 报告语言，未设置时由模型跟随用户问题的语言
    pub target_language: Option<TargetLanguage>,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// LLM API KEY
    pub api_key: String,

    /// LLM API基地址
    pub api_base_url: String,

    /// 高能效模型，优先用于常规的规划、提炼任务
    pub model_efficient: String,

    /// 高质量模型，用于超长prompt，以及作为efficient失效情况下的兜底
    pub model_powerful: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    /// 重试次数
    pub retry_attempts: u32,

    /// 重试间隔（毫秒）
    pub retry_delay_ms: u64,

    /// 单次调用超时时间（秒）
    pub timeout_seconds: u64,
}

/// 网页搜索配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索服务 API KEY
    pub api_key: String,

    /// 搜索服务基地址
    pub api_base_url: String,

    /// 每个搜索词返回的结果数
    pub num_results: u32,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

/// 调研流程配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ResearchConfig {
    /// 未指定时使用的迭代轮数
    pub default_iterations: usize,

    /// 迭代轮数上限，调用方请求的轮数会被截断到此值
    pub max_iterations: usize,

    /// 低于该字符数的文本视为已提炼，跳过模型调用
    pub short_text_threshold: usize,

    /// 提炼时发送给模型的页面内容最大字符数
    pub page_excerpt_chars: usize,

    /// 收敛评估时发送给模型的累计上下文最大字符数
    pub evaluation_context_chars: usize,

    /// 生成报告时发送给模型的上下文最大字符数
    pub report_context_chars: usize,

    /// 兜底报告中最多列出的发现条数
    pub fallback_findings_limit: usize,

    /// 是否在提炼前让模型判断页面是否有用
    pub relevance_filter: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 检查调研所需的凭证是否齐全
    pub fn ensure_credentials(&self) -> Result<(), ResearchError> {
        if self.llm.provider.requires_api_key() && self.llm.api_key.trim().is_empty() {
            return Err(ResearchError::MissingCredential(format!(
                "LLM API key for provider '{}'",
                self.llm.provider
            )));
        }
        if self.search.api_key.trim().is_empty() {
            return Err(ResearchError::MissingCredential(
                "web search API key".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// 启动调研前的校验：凭证齐全，并将请求的轮数截断到上限
    pub fn research_iteration_limit(&self, requested: usize) -> Result<usize, ResearchError> {
        self.ensure_credentials()?;
        self.research.clamp_iterations(requested)
    }
}

impl ResearchConfig {
    /// 将调用方请求的迭代轮数截断到上限，0轮视为配置错误
    pub fn clamp_iterations(&self, requested: usize) -> Result<usize, ResearchError> {
        if requested == 0 {
            return Err(ResearchError::InvalidIterationLimit(requested));
        }
        Ok(requested.min(self.max_iterations.max(1)))
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::default(),
            api_key: std::env::var("RESEARCH_LLM_API_KEY")
                .or_else(|_| std::env::var("ANTHROPIC_API_KEY"))
                .unwrap_or_default(),
            api_base_url: String::from("https://api.anthropic.com"),
            model_efficient: String::from("claude-3-5-sonnet-20240620"),
            model_powerful: String::from("claude-3-5-sonnet-20240620"),
            max_tokens: 8192,
            temperature: 0.0,
            retry_attempts: 3,
            retry_delay_ms: 2000,
            timeout_seconds: 120,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("EXA_API_KEY").unwrap_or_default(),
            api_base_url: String::from("https://api.exa.ai"),
            num_results: 6,
            timeout_seconds: 30,
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            default_iterations: 3,
            max_iterations: 5,
            short_text_threshold: 200,
            page_excerpt_chars: 5000,
            evaluation_context_chars: 10_000,
            report_context_chars: 20_000,
            fallback_findings_limit: 10,
            relevance_filter: false,
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
