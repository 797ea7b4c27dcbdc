//! Domain Layer - Core business types for the NFT service
//!
//! Pure types and logic with no external dependencies. Gateway and cache
//! interactions happen through the ports and adapters layers.

pub mod token;
pub mod metadata;

pub use token::{TokenReference, ContractInfo};
pub use metadata::{resolve_token_uri, ResolvedTokenUri, MetadataError, NFT_TYPE_LINK};
