//! Adapters Layer - External System Implementations
//!
//! - Gateway: CosmWasm smart-query REST client and typed query payloads
//! - Cache: in-memory CacheStore implementation
//! - CLI: command-line interface handlers

pub mod gateway;
pub mod cache;
pub mod cli;

pub use gateway::{ContractQueryClient, GatewayClientConfig, GatewayError};
pub use cache::MemoryCacheStore;
pub use cli::CliApp;
