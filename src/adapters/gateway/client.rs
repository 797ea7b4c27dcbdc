//! Contract Query Client
//!
//! Issues smart queries against the CosmWasm REST gateway. A query object
//! is serialized to JSON, base64-encoded, and appended to the contract's
//! smart-query path as a GET request.
//!
//! Failure policy: a transport error is surfaced as `Err` so callers who
//! care can tell it apart from a rejected query; a non-2xx status (the
//! gateway's way of saying the contract rejected the query or the entity
//! does not exist) is `Ok(None)`. There is deliberately no retry layer.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when querying the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to encode query: {0}")]
    EncodeQuery(#[from] serde_json::Error),

    #[error("Failed to parse gateway response: {0}")]
    Parse(String),
}

/// Configuration for the ContractQueryClient
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// Base URL of the CosmWasm REST gateway
    pub rest_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GatewayClientConfig {
    fn default() -> Self {
        Self {
            // Standard cosmos-sdk REST port on a local craftd node
            rest_url: "http://127.0.0.1:1317".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GatewayClientConfig {
    /// Create config with a custom gateway URL
    pub fn with_rest_url(rest_url: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            ..Default::default()
        }
    }
}

/// Envelope the gateway wraps every smart-query result in
#[derive(Debug, Deserialize)]
struct SmartQueryResponse {
    data: Value,
}

/// Client for smart queries against cw721 contracts
#[derive(Debug, Clone)]
pub struct ContractQueryClient {
    config: GatewayClientConfig,
    http: Client,
}

impl ContractQueryClient {
    /// Create a client for the given gateway URL with default settings
    pub fn new(rest_url: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_config(GatewayClientConfig::with_rest_url(rest_url))
    }

    /// Create a client with custom configuration
    pub fn with_config(config: GatewayClientConfig) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// Issue a smart query, returning the raw `data` payload
    ///
    /// `Ok(None)` means the gateway answered but had nothing for this
    /// query; `Err` means the gateway could not be reached.
    pub async fn smart_query(
        &self,
        contract_address: &str,
        query: &Value,
    ) -> Result<Option<Value>, GatewayError> {
        let url = self.smart_query_url(contract_address, query)?;

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%contract_address, %status, "smart query rejected by gateway");
            return Ok(None);
        }

        let body: SmartQueryResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;
        Ok(Some(body.data))
    }

    /// Issue a smart query and deserialize the payload into `T`
    ///
    /// A payload that does not match `T` (a missing expected field) is
    /// treated as not found, matching the service's contracts.
    pub async fn smart_query_as<T: DeserializeOwned>(
        &self,
        contract_address: &str,
        query: &Value,
    ) -> Result<Option<T>, GatewayError> {
        let Some(data) = self.smart_query(contract_address, query).await? else {
            return Ok(None);
        };

        match serde_json::from_value(data) {
            Ok(typed) => Ok(Some(typed)),
            Err(e) => {
                tracing::debug!(%contract_address, error = %e, "smart query payload missing expected fields");
                Ok(None)
            }
        }
    }

    /// Build the full smart-query URL for a contract and query object
    pub fn smart_query_url(
        &self,
        contract_address: &str,
        query: &Value,
    ) -> Result<String, GatewayError> {
        let encoded = BASE64.encode(serde_json::to_vec(query)?);
        Ok(format!(
            "{}/cosmwasm/wasm/v1/contract/{}/smart/{}",
            self.config.rest_url, contract_address, encoded
        ))
    }

    /// Get the configured gateway URL
    pub fn rest_url(&self) -> &str {
        &self.config.rest_url
    }
}
