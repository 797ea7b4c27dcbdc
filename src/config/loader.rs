//! Configuration Loader
//!
//! Loads and validates configuration from environment variables. The only
//! required variable is `CRAFTD_REST`, the base URL of the chain's smart
//! query gateway; everything else has a sane default.

use std::time::Duration;
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewaySection,
    pub cache: CacheSection,
    pub query: QuerySection,
}

/// Gateway configuration section
#[derive(Debug, Clone)]
pub struct GatewaySection {
    /// Base URL of the CosmWasm REST gateway (CRAFTD_REST)
    pub rest_url: String,
    /// Request timeout in seconds (CRAFTD_TIMEOUT_SECS)
    pub timeout_secs: u64,
}

/// Cache configuration section
#[derive(Debug, Clone)]
pub struct CacheSection {
    /// TTL for the token metadata bucket, in seconds (CRAFTD_TOKEN_CACHE_TTL_SECS)
    pub token_metadata_ttl_secs: u64,
}

/// Query paging configuration section
#[derive(Debug, Clone)]
pub struct QuerySection {
    /// Page cap for owned-token listings (CRAFTD_OWNED_TOKENS_LIMIT)
    pub owned_tokens_limit: u32,
    /// Page cap for all-token listings (CRAFTD_ALL_TOKENS_LIMIT)
    pub all_tokens_limit: u32,
}

impl GatewaySection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheSection {
    pub fn token_metadata_ttl(&self) -> Duration {
        Duration::from_secs(self.token_metadata_ttl_secs)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {var}: {message}")]
    InvalidVar { var: &'static str, message: String },
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl Config {
    /// Default gateway timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default token metadata TTL: 24 hours
    pub const DEFAULT_TOKEN_CACHE_TTL_SECS: u64 = 86_400;
    /// Default page cap for a wallet's owned tokens
    pub const DEFAULT_OWNED_TOKENS_LIMIT: u32 = 500;
    /// Default page cap for a contract's full token listing
    pub const DEFAULT_ALL_TOKENS_LIMIT: u32 = 100;

    /// Build a configuration with defaults for everything but the gateway URL
    pub fn with_rest_url(rest_url: impl Into<String>) -> Self {
        Self {
            gateway: GatewaySection {
                rest_url: rest_url.into(),
                timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            },
            cache: CacheSection {
                token_metadata_ttl_secs: Self::DEFAULT_TOKEN_CACHE_TTL_SECS,
            },
            query: QuerySection {
                owned_tokens_limit: Self::DEFAULT_OWNED_TOKENS_LIMIT,
                all_tokens_limit: Self::DEFAULT_ALL_TOKENS_LIMIT,
            },
        }
    }

    /// Load configuration from the environment
    ///
    /// `CRAFTD_REST` is required; optional overrides:
    /// `CRAFTD_TIMEOUT_SECS`, `CRAFTD_TOKEN_CACHE_TTL_SECS`,
    /// `CRAFTD_OWNED_TOKENS_LIMIT`, `CRAFTD_ALL_TOKENS_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rest_url =
            std::env::var("CRAFTD_REST").map_err(|_| ConfigError::MissingVar("CRAFTD_REST"))?;

        let mut config = Self::with_rest_url(rest_url);
        config.gateway.timeout_secs =
            env_or("CRAFTD_TIMEOUT_SECS", config.gateway.timeout_secs)?;
        config.cache.token_metadata_ttl_secs = env_or(
            "CRAFTD_TOKEN_CACHE_TTL_SECS",
            config.cache.token_metadata_ttl_secs,
        )?;
        config.query.owned_tokens_limit =
            env_or("CRAFTD_OWNED_TOKENS_LIMIT", config.query.owned_tokens_limit)?;
        config.query.all_tokens_limit =
            env_or("CRAFTD_ALL_TOKENS_LIMIT", config.query.all_tokens_limit)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gateway.rest_url.starts_with("http://")
            && !self.gateway.rest_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "CRAFTD_REST must be an http(s) URL, got '{}'",
                self.gateway.rest_url
            )));
        }

        if self.gateway.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gateway timeout must be > 0 seconds".to_string(),
            ));
        }

        if self.query.owned_tokens_limit == 0 {
            return Err(ConfigError::ValidationError(
                "owned_tokens_limit must be > 0".to_string(),
            ));
        }

        if self.query.all_tokens_limit == 0 {
            return Err(ConfigError::ValidationError(
                "all_tokens_limit must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Read an env var, parsing it into the target type, falling back to `default`
fn env_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
