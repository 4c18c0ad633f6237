//! rate-limit-probe CLI
//!
//! Authenticates against a vendor API, then probes one endpoint until it
//! starts rate limiting.

use anyhow::Result;
use clap::Parser;
use rate_limit_probe::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a local .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the probe
    cli.run().await?;

    Ok(())
}
