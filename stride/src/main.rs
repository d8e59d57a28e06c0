#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::sync::Arc;

use args::Args;
use clap::Parser;
use stride_analysis::{PromptTestRunner, ProviderRegistry};
use stride_config::Config;
use stride_store::{MemoryStore, ResultStore};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load(&args.config)?;

    tracing::info!(
        config_path = %args.config.display(),
        "starting stride prompt test"
    );

    let registry = Arc::new(ProviderRegistry::from_config(&config.analysis));
    if registry.is_empty() {
        anyhow::bail!("no providers available, check the API keys referenced by {}", args.config.display());
    }

    let store: Arc<dyn ResultStore> = Arc::new(MemoryStore::new());
    let runner = PromptTestRunner::new(registry, Arc::clone(&store), config.analysis.call_timeout);

    let run_id = Uuid::new_v4();
    let summary = runner.run(run_id, &args.prompt, &args.models).await;

    tracing::info!(
        successes = summary.successes,
        failures = summary.failures,
        "prompt test finished"
    );

    for record in store.prompt_runs_for(run_id).await? {
        println!("{}", serde_json::to_string_pretty(&record)?);
    }

    Ok(())
}
