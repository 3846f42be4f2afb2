use anyhow::Result;
use clap::Parser;
use deep_research::{cli, workflow::launch};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = cli::Args::parse();
    let request = args.research_request();
    let config = args.into_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli::log_level(&config))),
        )
        .with_target(false)
        .init();

    launch(&config, &request).await?;
    Ok(())
}
