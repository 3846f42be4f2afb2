pub mod cli;
pub mod config;
pub mod i18n;
pub mod jobs;
pub mod llm;
pub mod research;
pub mod search;
pub mod utils;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use jobs::{ResearchJobRunner, ResearchJobStore};
pub use research::{
    ResearchContext, ResearchError, ResearchOrchestrator, ResearchResult, research_with,
    run_research,
};
pub use workflow::launch;
