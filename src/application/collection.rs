//! NFT Collection Service
//!
//! The operations the marketplace/viewer calls: list a wallet's owned
//! token IDs, resolve per-token metadata through the cache, list a
//! contract's tokens, look up owners and contract info.
//!
//! Failure policy follows the gateway's consumer contracts: transport
//! failures and missing fields collapse to absent/empty sentinels (logged,
//! never thrown), except metadata parse failures, which indicate corrupt
//! on-chain data and propagate.

use std::sync::Arc;
use std::time::Duration;

use futures::future;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::adapters::gateway::{
    all_nft_info_query, all_tokens_query, contract_info_query, nft_info_query,
    owned_tokens_query, sort_tokens_by_id, AllNftInfoResponse, AllTokensResponse,
    ContractQueryClient, GatewayError, NftInfoResponse, OwnedTokensResponse,
};
use crate::config::Config;
use crate::domain::metadata::{resolve_token_uri, MetadataError, NFT_TYPE_LINK};
use crate::domain::token::{ContractInfo, TokenReference};
use crate::ports::cache::{CacheError, CacheStore};

use super::cache::{MetadataCache, CONTRACT_INFO_BUCKET, TOKEN_METADATA_BUCKET};

/// Errors surfaced by collection service operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Cache store error: {0}")]
    Cache(#[from] CacheError),

    #[error("Invalid JSON in cache or payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Gateway returned no data for {0}")]
    AbsentResponse(&'static str),
}

/// Orchestrates gateway queries and the metadata cache
pub struct NftCollectionService {
    gateway: Arc<ContractQueryClient>,
    cache: MetadataCache,
    owned_tokens_limit: u32,
    all_tokens_limit: u32,
    token_metadata_ttl: Duration,
}

impl NftCollectionService {
    pub fn new(
        gateway: Arc<ContractQueryClient>,
        store: Arc<dyn CacheStore>,
        config: &Config,
    ) -> Self {
        Self {
            gateway,
            cache: MetadataCache::new(store),
            owned_tokens_limit: config.query.owned_tokens_limit,
            all_tokens_limit: config.query.all_tokens_limit,
            token_metadata_ttl: config.cache.token_metadata_ttl(),
        }
    }

    /// List the token IDs a wallet owns in a contract
    ///
    /// Single page only, capped at the configured limit; wallets owning
    /// more tokens than the cap are silently truncated. `None` covers both
    /// an unknown wallet and a gateway failure.
    pub async fn owned_token_ids(
        &self,
        contract_address: &str,
        wallet: &str,
    ) -> Option<OwnedTokensResponse> {
        let query = owned_tokens_query(wallet, self.owned_tokens_limit);
        self.query_opt(contract_address, &query, "tokens").await
    }

    /// Resolve a token's metadata, cache-first
    ///
    /// On a miss, queries `nft_info`, normalizes the `token_uri`, appends
    /// `tokenId`, and writes the result back with the 24h bucket TTL.
    /// `Ok(None)` means the token does not exist or carries no `token_uri`.
    pub async fn query_token(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<Option<Value>, ServiceError> {
        let token = TokenReference::new(contract_address, token_id);
        let field = token.cache_field();

        self.cache
            .get_or_fetch(
                TOKEN_METADATA_BUCKET,
                &field,
                Some(self.token_metadata_ttl),
                || async {
                    let query = nft_info_query(token_id);
                    let Some(info) = self
                        .query_opt::<NftInfoResponse>(contract_address, &query, "nft_info")
                        .await
                    else {
                        return Ok(None);
                    };

                    let Some(token_uri) = info.token_uri() else {
                        tracing::debug!(contract_address, token_id, "token has no token_uri");
                        return Ok(None);
                    };

                    let resolved = resolve_token_uri(token_uri)?;
                    Ok(Some(resolved.into_metadata(token_id)))
                },
            )
            .await
    }

    /// Resolve metadata for every token a wallet owns
    ///
    /// All per-token resolutions run concurrently with no cap, completing
    /// in arbitrary order; one metadata error fails the whole aggregate.
    /// An absent ID list yields an empty result with no per-token queries.
    pub async fn owned_tokens_metadata(
        &self,
        contract_address: &str,
        wallet: &str,
    ) -> Result<Vec<Value>, ServiceError> {
        let Some(owned) = self.owned_token_ids(contract_address, wallet).await else {
            return Ok(Vec::new());
        };

        let fetches = owned
            .tokens
            .iter()
            .map(|token_id| self.query_token(contract_address, token_id));
        let results = future::try_join_all(fetches).await?;

        // Tokens that vanished between the listing and the per-token query
        // resolve to absent and are dropped.
        Ok(results.into_iter().flatten().collect())
    }

    /// List every token in a contract, sorted ascending by numeric token_id
    ///
    /// Unlike the other listings this errors when the gateway has no
    /// answer: callers treat a missing full listing as a hard failure
    /// rather than an empty collection.
    pub async fn all_tokens(&self, contract_address: &str) -> Result<Vec<Value>, ServiceError> {
        let query = all_tokens_query(self.all_tokens_limit);
        let response = self
            .gateway
            .smart_query_as::<AllTokensResponse>(contract_address, &query)
            .await?;

        let Some(mut response) = response else {
            return Err(ServiceError::AbsentResponse("all_tokens"));
        };

        sort_tokens_by_id(&mut response.tokens);
        Ok(response.tokens)
    }

    /// Look up a token's owner; empty string when it cannot be determined
    ///
    /// Not cached: ownership changes with every transfer.
    pub async fn owner_of(&self, contract_address: &str, token_id: &str) -> String {
        let query = all_nft_info_query(token_id);
        let Some(info) = self
            .query_opt::<AllNftInfoResponse>(contract_address, &query, "all_nft_info")
            .await
        else {
            return String::new();
        };
        info.owner().unwrap_or_default().to_string()
    }

    /// Contract name and symbol, cached permanently
    pub async fn contract_info(
        &self,
        contract_address: &str,
    ) -> Result<Option<ContractInfo>, ServiceError> {
        self.cache
            .get_or_fetch(CONTRACT_INFO_BUCKET, contract_address, None, || async {
                let query = contract_info_query();
                Ok(self
                    .query_opt::<ContractInfo>(contract_address, &query, "contract_info")
                    .await)
            })
            .await
    }

    /// The display image for a token
    ///
    /// Link-style metadata yields the link itself; JSON metadata yields its
    /// `imageLink` field. `Ok(None)` when the token or field is absent.
    pub async fn image_for_token(
        &self,
        contract_address: &str,
        token_id: &str,
    ) -> Result<Option<String>, ServiceError> {
        let Some(metadata) = self.query_token(contract_address, token_id).await? else {
            return Ok(None);
        };

        let image = if metadata["_nft_type"] == NFT_TYPE_LINK {
            metadata["token_uri"].as_str()
        } else {
            metadata["imageLink"].as_str()
        };
        Ok(image.map(str::to_string))
    }

    /// Query the gateway, collapsing transport failures to absent
    ///
    /// The documented contract of the listing/lookup operations is
    /// absent-on-failure; the swallowed error is logged at warn.
    async fn query_opt<T: DeserializeOwned>(
        &self,
        contract_address: &str,
        query: &Value,
        what: &'static str,
    ) -> Option<T> {
        match self.gateway.smart_query_as(contract_address, query).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(contract_address, error = %err, "{} query failed", what);
                None
            }
        }
    }
}
