//! craft-nfts - NFT query and metadata cache service for the CRAFT chain
//!
//! CLI entry point: resolves NFT ownership and metadata from the CosmWasm
//! gateway configured by `CRAFTD_REST`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use craft_nfts::adapters::cli::{self, CliApp};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (CRAFTD_REST and friends go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    cli::execute(app).await
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}
