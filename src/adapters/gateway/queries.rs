//! Smart Query Payloads
//!
//! Builders for the five cw721 queries this service issues, plus the typed
//! shapes of their responses. Shapes match the contract's query schema
//! exactly; `start_after` is pinned to "0" because the service only ever
//! fetches the first page.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// `{"tokens":{...}}` - token IDs owned by a wallet
pub fn owned_tokens_query(wallet: &str, limit: u32) -> Value {
    json!({
        "tokens": {
            "owner": wallet,
            "start_after": "0",
            "limit": limit,
        }
    })
}

/// `{"all_tokens":{...}}` - every token ID in the contract (first page)
pub fn all_tokens_query(limit: u32) -> Value {
    json!({
        "all_tokens": {
            "start_after": "0",
            "limit": limit,
        }
    })
}

/// `{"nft_info":{...}}` - a token's `token_uri`
pub fn nft_info_query(token_id: &str) -> Value {
    json!({ "nft_info": { "token_id": token_id } })
}

/// `{"all_nft_info":{...}}` - token info plus ownership access
pub fn all_nft_info_query(token_id: &str) -> Value {
    json!({ "all_nft_info": { "token_id": token_id } })
}

/// `{"contract_info":{}}` - contract name and symbol
pub fn contract_info_query() -> Value {
    json!({ "contract_info": {} })
}

/// Response to the `tokens` query: `{ "tokens": ["1", "101", ...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedTokensResponse {
    pub tokens: Vec<String>,
}

/// Response to the `nft_info` query; only `token_uri` matters here
#[derive(Debug, Clone, Deserialize)]
pub struct NftInfoResponse {
    #[serde(default)]
    token_uri: Option<String>,
}

impl NftInfoResponse {
    /// The token's metadata pointer
    ///
    /// Contracts that mint without metadata leave `token_uri` null or
    /// empty; both count as missing.
    pub fn token_uri(&self) -> Option<&str> {
        self.token_uri.as_deref().filter(|uri| !uri.is_empty())
    }
}

/// Response to the `all_nft_info` query
#[derive(Debug, Clone, Deserialize)]
pub struct AllNftInfoResponse {
    #[serde(default)]
    pub access: Option<NftAccess>,
}

/// Ownership section of an `all_nft_info` response
#[derive(Debug, Clone, Deserialize)]
pub struct NftAccess {
    #[serde(default)]
    pub owner: Option<String>,
}

impl AllNftInfoResponse {
    pub fn owner(&self) -> Option<&str> {
        self.access.as_ref()?.owner.as_deref()
    }
}

/// Response to the `all_tokens` query
///
/// Entries are kept as raw JSON: marketplace contracts return objects with
/// a `token_id` field and arbitrary listing data alongside it.
#[derive(Debug, Clone, Deserialize)]
pub struct AllTokensResponse {
    pub tokens: Vec<Value>,
}

/// Sort token entries ascending by numeric `token_id`
///
/// Entries without a numeric `token_id` sort last.
pub fn sort_tokens_by_id(tokens: &mut [Value]) {
    tokens.sort_by_key(|token| numeric_token_id(token).unwrap_or(u64::MAX));
}

fn numeric_token_id(token: &Value) -> Option<u64> {
    match &token["token_id"] {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_tokens_query_shape() {
        let query = owned_tokens_query("craft1wallet", 500);
        assert_eq!(
            query,
            json!({"tokens": {"owner": "craft1wallet", "start_after": "0", "limit": 500}})
        );
    }

    #[test]
    fn test_all_tokens_query_shape() {
        let query = all_tokens_query(100);
        assert_eq!(
            query,
            json!({"all_tokens": {"start_after": "0", "limit": 100}})
        );
    }

    #[test]
    fn test_nft_info_query_shape() {
        assert_eq!(
            nft_info_query("2"),
            json!({"nft_info": {"token_id": "2"}})
        );
        assert_eq!(
            all_nft_info_query("2"),
            json!({"all_nft_info": {"token_id": "2"}})
        );
        assert_eq!(contract_info_query(), json!({"contract_info": {}}));
    }

    #[test]
    fn test_owned_tokens_response_parse() {
        let response: OwnedTokensResponse =
            serde_json::from_value(json!({"tokens": ["1", "101", "102", "2", "8", "9"]})).unwrap();
        assert_eq!(response.tokens.len(), 6);
    }

    #[test]
    fn test_nft_info_empty_token_uri_counts_as_missing() {
        let present: NftInfoResponse =
            serde_json::from_value(json!({"token_uri": "ipfs://x"})).unwrap();
        assert_eq!(present.token_uri(), Some("ipfs://x"));

        let empty: NftInfoResponse = serde_json::from_value(json!({"token_uri": ""})).unwrap();
        assert_eq!(empty.token_uri(), None);

        let missing: NftInfoResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.token_uri(), None);

        let null: NftInfoResponse = serde_json::from_value(json!({"token_uri": null})).unwrap();
        assert_eq!(null.token_uri(), None);
    }

    #[test]
    fn test_all_nft_info_owner() {
        let response: AllNftInfoResponse = serde_json::from_value(json!({
            "access": {"owner": "craft1owner", "approvals": []},
            "info": {"token_uri": "ipfs://x"}
        }))
        .unwrap();
        assert_eq!(response.owner(), Some("craft1owner"));

        let empty: AllNftInfoResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.owner(), None);
    }

    #[test]
    fn test_sort_tokens_numeric_ascending() {
        let mut tokens = vec![
            json!({"token_id": "10"}),
            json!({"token_id": "2"}),
            json!({"token_id": "1"}),
        ];
        sort_tokens_by_id(&mut tokens);
        let ids: Vec<&str> = tokens
            .iter()
            .map(|t| t["token_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_sort_tokens_non_numeric_last() {
        let mut tokens = vec![
            json!({"token_id": "plot-a"}),
            json!({"token_id": "3"}),
        ];
        sort_tokens_by_id(&mut tokens);
        assert_eq!(tokens[0]["token_id"], "3");
        assert_eq!(tokens[1]["token_id"], "plot-a");
    }
}
