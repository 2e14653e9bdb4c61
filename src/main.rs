use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use milestone_contracts::config;
use milestone_contracts::contracts::init_global;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up private keys and RUST_LOG from a local .env file
    dotenv::dotenv().ok();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let cli = cli::Cli::parse();

    // Load and validate configuration
    let mut config = match config::load_config_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    if let Some(dir) = &cli.artifacts_dir {
        config.artifacts.dir = dir.clone();
    }
    if let Some(schema) = cli.schema {
        config.artifacts.schema = schema;
    }

    let contracts = init_global(&config.artifacts.dir, config.artifacts.schema).with_context(|| {
        format!(
            "Failed to load contract artifacts from {:?}",
            config.artifacts.dir
        )
    })?;

    info!(
        "Loaded {} contract classes from {:?}",
        contracts.iter().count(),
        config.artifacts.dir
    );

    cli::run(cli, &config, contracts).await
}
