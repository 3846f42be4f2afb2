use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::research::{ResearchContext, ResearchOrchestrator, ResearchResult};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: Vec<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: Vec::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .push((phase_name.to_string(), Instant::now()));
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let index = self
            .phase_start_times
            .iter()
            .position(|(name, _)| name == phase_name)?;
        let (name, start_time) = self.phase_start_times.remove(index);
        let duration = start_time.elapsed();
        self.phase_durations.push((name, duration));
        Some(duration)
    }

    /// 获取格式化的执行时间报告，阶段按结束顺序排列
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.start_time.elapsed().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const GATHER: &'static str = "planning & iterating";
    pub const SYNTHESIZE: &'static str = "synthesizing";
}

/// 一次命令行调研请求
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    pub query: String,
    pub iterations: Option<usize>,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// 启动一次调研：校验配置、执行、打印并保存报告
pub async fn launch(config: &Config, request: &ResearchRequest) -> Result<ResearchResult> {
    let requested = request
        .iterations
        .unwrap_or(config.research.default_iterations);
    let iteration_limit = config.research_iteration_limit(requested)?;

    let context = ResearchContext::from_config(config.clone())?;
    let mut timing = TimingScope::new();

    println!("🔍 开始调研: {}", request.query);
    println!("🔁 最大迭代轮数: {}", iteration_limit);

    timing.start_phase(TimingKeys::GATHER);
    let state = ResearchOrchestrator
        .gather(&context, &request.query, iteration_limit)
        .await?;
    timing.end_phase(TimingKeys::GATHER);
    println!(
        "📚 已完成 {} 轮搜索，收集到 {} 条上下文",
        state.iteration,
        state.aggregated_contexts.len()
    );

    timing.start_phase(TimingKeys::SYNTHESIZE);
    let result = ResearchOrchestrator
        .write_report(&context, &request.query, state)
        .await;
    timing.end_phase(TimingKeys::SYNTHESIZE);

    println!("\n{}\n", result.report);

    if let Some(path) = &request.output {
        save_report(path, &result.report)?;
        println!("💾 报告已保存到: {}", path.display());
    }
    if let Some(path) = &request.json {
        save_json(path, &result)?;
        println!("💾 结果已保存到: {}", path.display());
    }

    if config.verbose {
        println!("⏱️ {}", timing.generate_timing_report());
    }
    println!("✅ 调研完成");

    Ok(result)
}

fn save_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report)
        .with_context(|| format!("Failed to write report: {}", path.display()))
}

fn save_json(path: &Path, result: &ResearchResult) -> Result<()> {
    let content = serde_json::to_string_pretty(result)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write result: {}", path.display()))
}
