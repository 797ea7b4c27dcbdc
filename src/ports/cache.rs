//! Cache store port
//!
//! The exact store surface this service consumes: hash-field get/set within
//! named buckets, plus a bucket-level expiry. The production deployment
//! backs this with Redis hashes; tests and the CLI use the in-memory
//! adapter. Redis has no per-field TTL inside a hash, which is why expiry
//! is bucket-wide.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a cache store backend
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Key-value store abstraction: named buckets of string hash fields
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a field from a bucket; `None` if the field or bucket is absent
    async fn hash_get(&self, bucket: &str, field: &str) -> Result<Option<String>, CacheError>;

    /// Write a field into a bucket, creating the bucket if needed
    async fn hash_set(&self, bucket: &str, field: &str, value: &str) -> Result<(), CacheError>;

    /// (Re)set the expiry of a whole bucket
    ///
    /// Expiring a bucket drops every field in it at once.
    async fn expire(&self, bucket: &str, ttl: Duration) -> Result<(), CacheError>;
}
