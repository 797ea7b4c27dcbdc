//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract the external
//! key-value store so the application layer never touches a concrete
//! client. The gateway HTTP client lives in the adapters layer and is
//! injected by handle.

pub mod cache;
pub mod mocks;

pub use cache::{CacheStore, CacheError};
