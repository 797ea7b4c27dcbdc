//! CLI Command Handlers
//!
//! One subcommand per service operation, each printing the result as
//! pretty JSON. The gateway URL comes from `CRAFTD_REST` unless overridden
//! with `--rest-url`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::cache::MemoryCacheStore;
use crate::adapters::gateway::{ContractQueryClient, GatewayClientConfig};
use crate::application::NftCollectionService;
use crate::config::Config;

/// craft-nfts - NFT query and metadata cache service for the CRAFT chain
#[derive(Parser, Debug)]
#[command(
    name = "craft-nfts",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query NFT ownership and metadata from the CRAFT CosmWasm gateway"
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Override the gateway base URL (defaults to CRAFTD_REST)
    #[arg(long, global = true, value_name = "URL")]
    pub rest_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve metadata for every NFT a wallet owns
    Owned(OwnedCmd),

    /// Resolve one token's metadata
    Token(TokenCmd),

    /// Look up a token's owner
    Owner(OwnerCmd),

    /// List every token in a contract
    AllTokens(AllTokensCmd),

    /// Show a contract's name and symbol
    ContractInfo(ContractInfoCmd),

    /// Show the display image for a token
    Image(ImageCmd),
}

#[derive(Parser, Debug)]
pub struct OwnedCmd {
    /// cw721 contract address
    pub contract_address: String,
    /// Wallet address
    pub wallet: String,
}

#[derive(Parser, Debug)]
pub struct TokenCmd {
    /// cw721 contract address
    pub contract_address: String,
    /// Token ID
    pub token_id: String,
}

#[derive(Parser, Debug)]
pub struct OwnerCmd {
    /// cw721 contract address
    pub contract_address: String,
    /// Token ID
    pub token_id: String,
}

#[derive(Parser, Debug)]
pub struct AllTokensCmd {
    /// cw721 contract address
    pub contract_address: String,
}

#[derive(Parser, Debug)]
pub struct ContractInfoCmd {
    /// cw721 contract address
    pub contract_address: String,
}

#[derive(Parser, Debug)]
pub struct ImageCmd {
    /// cw721 contract address
    pub contract_address: String,
    /// Token ID
    pub token_id: String,
}

/// Execute the parsed CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    let service = build_service(app.rest_url)?;

    match app.command {
        Command::Owned(cmd) => {
            let metadata = service
                .owned_tokens_metadata(&cmd.contract_address, &cmd.wallet)
                .await?;
            print_json(&metadata)
        }
        Command::Token(cmd) => {
            let metadata = service
                .query_token(&cmd.contract_address, &cmd.token_id)
                .await?;
            print_json(&metadata)
        }
        Command::Owner(cmd) => {
            let owner = service.owner_of(&cmd.contract_address, &cmd.token_id).await;
            println!("{}", owner);
            Ok(())
        }
        Command::AllTokens(cmd) => {
            let tokens = service.all_tokens(&cmd.contract_address).await?;
            print_json(&tokens)
        }
        Command::ContractInfo(cmd) => {
            let info = service.contract_info(&cmd.contract_address).await?;
            print_json(&info)
        }
        Command::Image(cmd) => {
            let image = service
                .image_for_token(&cmd.contract_address, &cmd.token_id)
                .await?;
            print_json(&image)
        }
    }
}

/// Build the service from env config, with an optional gateway override
fn build_service(rest_url: Option<String>) -> Result<NftCollectionService> {
    let config = match rest_url {
        Some(url) => Config::with_rest_url(url),
        None => Config::from_env().context("Failed to load configuration")?,
    };
    config.validate().context("Invalid configuration")?;

    let gateway = ContractQueryClient::with_config(GatewayClientConfig {
        rest_url: config.gateway.rest_url.clone(),
        timeout: config.gateway.timeout(),
    })
    .context("Failed to create gateway client")?;

    // The CLI is a one-shot process; an in-memory store still gives the
    // fan-out commands dedup within the run.
    let store = Arc::new(MemoryCacheStore::new());

    Ok(NftCollectionService::new(Arc::new(gateway), store, &config))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_owned_command() {
        let app = CliApp::parse_from(["craft-nfts", "owned", "craft1contract", "craft1wallet"]);
        match app.command {
            Command::Owned(cmd) => {
                assert_eq!(cmd.contract_address, "craft1contract");
                assert_eq!(cmd.wallet, "craft1wallet");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_rest_url() {
        let app = CliApp::parse_from([
            "craft-nfts",
            "token",
            "craft1contract",
            "7",
            "--rest-url",
            "http://127.0.0.1:1317",
        ]);
        assert_eq!(app.rest_url.as_deref(), Some("http://127.0.0.1:1317"));
    }
}
