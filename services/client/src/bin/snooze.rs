//! services/client/src/bin/snooze.rs

use std::process::ExitCode;

use client_lib::{
    cli::{run_and_report, Cli},
    config::Config,
    error::ClientError,
    state::AppState,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode, ClientError> {
    // --- 1. Parse Arguments, Load Configuration & Set Up Logging ---
    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!(base_url = %config.base_url, "Configuration loaded.");

    // --- 2. Initialize Adapters ---
    let state = AppState::from_config(&config)?;

    // --- 3. Run the Command ---
    let mut stdout = std::io::stdout().lock();
    if run_and_report(cli.command, &state, &mut stdout).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
