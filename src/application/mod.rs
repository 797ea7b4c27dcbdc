//! Application Layer - Orchestration
//!
//! Wires the gateway client and the cache store port together behind the
//! operations the marketplace/viewer calls.

pub mod cache;
pub mod collection;

pub use cache::{MetadataCache, TOKEN_METADATA_BUCKET, CONTRACT_INFO_BUCKET};
pub use collection::{NftCollectionService, ServiceError};
