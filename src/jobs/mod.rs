//! 后台调研任务 - 显式注入的任务表与启动器

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::research::{ResearchContext, ResearchError, ResearchOrchestrator, ResearchResult};

/// 任务状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    InProgress,
    Completed { result: ResearchResult },
    #[serde(rename = "error")]
    Failed { error: String },
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::InProgress => write!(f, "in_progress"),
            JobStatus::Completed { .. } => write!(f, "completed"),
            JobStatus::Failed { .. } => write!(f, "error"),
        }
    }
}

/// 一个后台调研任务的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchJob {
    pub id: String,
    pub query: String,
    #[serde(flatten)]
    pub status: JobStatus,
    pub progress: usize,
    pub total_iterations: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ResearchJob {
    pub fn new(id: String, query: String, total_iterations: usize) -> Self {
        Self {
            id,
            query,
            status: JobStatus::InProgress,
            progress: 0,
            total_iterations,
            started_at: Utc::now(),
            finished_at: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("research job not found: {0}")]
    NotFound(String),
    #[error("research job {id} is not completed (status: {status})")]
    NotCompleted { id: String, status: String },
    #[error(transparent)]
    Research(#[from] ResearchError),
}

/// 任务表，可在多个启动器之间共享
#[derive(Debug, Clone, Default)]
pub struct ResearchJobStore {
    jobs: Arc<RwLock<HashMap<String, ResearchJob>>>,
}

impl ResearchJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, job: ResearchJob) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// 标记任务完成，进度置为总轮数
    pub async fn complete(&self, id: &str, result: ResearchResult) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.progress = job.total_iterations;
            job.status = JobStatus::Completed { result };
            job.finished_at = Some(Utc::now());
        }
    }

    pub async fn fail(&self, id: &str, error: String) {
        if let Some(job) = self.jobs.write().await.get_mut(id) {
            job.status = JobStatus::Failed { error };
            job.finished_at = Some(Utc::now());
        }
    }

    pub async fn get(&self, id: &str) -> Option<ResearchJob> {
        self.jobs.read().await.get(id).cloned()
    }

    /// 全部任务，按启动时间排序
    pub async fn list(&self) -> Vec<ResearchJob> {
        let mut jobs: Vec<ResearchJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by_key(|job| job.started_at);
        jobs
    }
}

/// 已启动的任务
pub struct StartedJob {
    pub id: String,
    pub handle: JoinHandle<()>,
}

/// 后台任务启动器
#[derive(Clone)]
pub struct ResearchJobRunner {
    context: ResearchContext,
    store: ResearchJobStore,
}

impl ResearchJobRunner {
    pub fn new(context: ResearchContext, store: ResearchJobStore) -> Self {
        Self { context, store }
    }

    pub fn store(&self) -> &ResearchJobStore {
        &self.store
    }

    /// 校验配置并在后台启动一次调研
    pub async fn start(
        &self,
        query: &str,
        requested_iterations: usize,
    ) -> Result<StartedJob, JobError> {
        let total_iterations = self
            .context
            .config
            .research_iteration_limit(requested_iterations)?;

        let id = Uuid::new_v4().to_string();
        self.store
            .insert(ResearchJob::new(id.clone(), query.to_string(), total_iterations))
            .await;
        tracing::info!(job_id = %id, total_iterations, "research job started");

        let context = self.context.clone();
        let store = self.store.clone();
        let job_id = id.clone();
        let query = query.to_string();
        let handle = tokio::spawn(async move {
            match ResearchOrchestrator
                .run(&context, &query, total_iterations)
                .await
            {
                Ok(result) => {
                    tracing::info!(
                        job_id = %job_id,
                        iterations = result.iterations,
                        "research job completed"
                    );
                    store.complete(&job_id, result).await;
                }
                Err(e) => {
                    tracing::error!(job_id = %job_id, error = %e, "research job failed");
                    store.fail(&job_id, e.to_string()).await;
                }
            }
        });

        Ok(StartedJob { id, handle })
    }

    pub async fn status(&self, id: &str) -> Result<ResearchJob, JobError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    /// 已完成任务的调研结果
    pub async fn result(&self, id: &str) -> Result<ResearchResult, JobError> {
        let job = self.status(id).await?;
        match job.status {
            JobStatus::Completed { result } => Ok(result),
            other => Err(JobError::NotCompleted {
                id: id.to_string(),
                status: other.to_string(),
            }),
        }
    }

    /// 最近启动的任务
    pub async fn latest(&self) -> Option<ResearchJob> {
        self.store.list().await.pop()
    }

    pub async fn list(&self) -> Vec<ResearchJob> {
        self.store.list().await
    }
}
