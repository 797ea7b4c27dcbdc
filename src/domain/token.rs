//! Token identity types

use serde::{Deserialize, Serialize};

/// Identifies a single NFT within a given cw721 contract
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenReference {
    pub contract_address: String,
    pub token_id: String,
}

impl TokenReference {
    pub fn new(contract_address: impl Into<String>, token_id: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            token_id: token_id.into(),
        }
    }

    /// Hash-field key used inside a cache bucket.
    ///
    /// Keyed per contract so the same cache serves the marketplace and any
    /// future cw721 contracts without collisions.
    pub fn cache_field(&self) -> String {
        format!("{}:{}", self.contract_address, self.token_id)
    }
}

/// Name and symbol reported by a cw721 contract's `contract_info` query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub name: String,
    pub symbol: String,
}
