//! CLI Adapter
//!
//! Command-line interface for inspecting NFT contracts through the
//! gateway. Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    CliApp, Command, OwnedCmd, TokenCmd, OwnerCmd, AllTokensCmd, ContractInfoCmd, ImageCmd,
};

use anyhow::Result;

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    commands::execute(app).await
}
