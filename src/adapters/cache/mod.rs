//! Cache Store Adapters
//!
//! In-process implementation of the `CacheStore` port. Production
//! deployments substitute a Redis-backed store behind the same trait.

pub mod memory;

pub use memory::MemoryCacheStore;
