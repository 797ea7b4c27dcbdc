//! craft-nfts - NFT query and metadata cache service for the CRAFT chain
//!
//! Resolves NFT ownership and token metadata from a CosmWasm smart-query
//! REST gateway, normalizing on-chain `token_uri` payloads (link, base64
//! blob, or raw JSON) into display-ready JSON and caching them in a
//! key-value store.
//!
//! # Modules
//!
//! - `domain`: Core business types (TokenReference, ContractInfo, token_uri resolver)
//! - `ports`: Trait abstractions (CacheStore)
//! - `adapters`: External implementations (gateway client, in-memory cache, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: MetadataCache and NftCollectionService orchestration

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
