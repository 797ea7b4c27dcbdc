//! CosmWasm Gateway Adapter
//!
//! HTTP client and query payloads for the chain's smart-contract REST
//! gateway (`{CRAFTD_REST}/cosmwasm/wasm/v1/contract/{addr}/smart/{query}`).

pub mod client;
pub mod queries;

pub use client::{ContractQueryClient, GatewayClientConfig, GatewayError};
pub use queries::{
    owned_tokens_query, all_tokens_query, nft_info_query, all_nft_info_query,
    contract_info_query, sort_tokens_by_id, OwnedTokensResponse, NftInfoResponse,
    AllNftInfoResponse, AllTokensResponse,
};
