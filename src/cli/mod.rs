use crate::config::{Config, LLMProvider};
use crate::i18n::TargetLanguage;
use crate::workflow::ResearchRequest;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// 默认配置文件名
const DEFAULT_CONFIG_FILE: &str = "research.toml";

/// Deep Research - 由大模型与网页搜索驱动的迭代式调研工具
#[derive(Parser, Debug)]
#[command(name = "deep-research")]
#[command(
    about = "Iterative web research: plans search queries, gathers and distills web content over several passes, then writes a report."
)]
#[command(version)]
pub struct Args {
    /// 调研问题
    pub query: String,

    /// 迭代轮数（不超过配置中的上限）
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 报告输出路径（Markdown）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 完整结果输出路径（JSON）
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// LLM Provider (openai, anthropic, deepseek, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 高能效模型，用于常规推理任务
    #[arg(long)]
    pub model_efficient: Option<String>,

    /// 高质量模型，用于超长prompt以及作为efficient失效情况下的兜底
    #[arg(long)]
    pub model_powerful: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 网页搜索 API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 每个搜索词返回的结果数
    #[arg(long)]
    pub num_results: Option<u32>,

    /// 提炼前先由模型判断页面是否有用
    #[arg(long)]
    pub relevance_filter: bool,

    /// 报告语言 (zh, en, ja, de, fr)
    #[arg(long)]
    pub target_language: Option<String>,
}

impl Args {
    /// 本次调研请求
    pub fn research_request(&self) -> ResearchRequest {
        ResearchRequest {
            query: self.query.clone(),
            iterations: self.iterations,
            output: self.output.clone(),
            json: self.json.clone(),
        }
    }

    /// 将CLI参数转换为配置：显式路径 > 当前目录下的research.toml > 默认值，CLI参数覆盖文件中的设置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            Config::from_file(config_path)?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path)?
            } else {
                Config::default()
            }
        };

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(model_efficient) = self.model_efficient {
            config.llm.model_efficient = model_efficient;
        }
        if let Some(model_powerful) = self.model_powerful {
            config.llm.model_powerful = model_powerful;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 覆盖搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(num_results) = self.num_results {
            config.search.num_results = num_results;
        }

        if self.relevance_filter {
            config.research.relevance_filter = true;
        }

        // 报告语言
        if let Some(target_language_str) = self.target_language {
            if let Ok(target_language) = target_language_str.parse::<TargetLanguage>() {
                config.target_language = Some(target_language);
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的目标语言: {}，报告将跟随问题的语言",
                    target_language_str
                );
            }
        }

        config.verbose = config.verbose || self.verbose;

        Ok(config)
    }
}

/// 默认日志级别，以合并后的配置为准
pub fn log_level(config: &Config) -> &'static str {
    if config.verbose { "debug" } else { "info" }
}
