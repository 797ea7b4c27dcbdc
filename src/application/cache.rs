//! Metadata Cache
//!
//! Read-through caching over the `CacheStore` port. Entries are
//! JSON-serialized into hash fields grouped by logical bucket; a bucket
//! carries at most one TTL, re-armed on every write. The store has no
//! per-field expiry inside a hash, so expiring a bucket expires every
//! entry in it - an accepted imprecision.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ports::cache::CacheStore;

use super::collection::ServiceError;

/// Bucket for resolved per-token metadata, keyed `"{contract}:{token_id}"`
pub const TOKEN_METADATA_BUCKET: &str = "cache:query_token";

/// Bucket for contract name/symbol, keyed by contract address, never expired
pub const CONTRACT_INFO_BUCKET: &str = "cache:contract_info";

/// JSON-over-hash-fields cache facade
#[derive(Clone)]
pub struct MetadataCache {
    store: Arc<dyn CacheStore>,
}

impl MetadataCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read and deserialize a cached entry; `None` on a miss
    pub async fn get<T: DeserializeOwned>(
        &self,
        bucket: &str,
        field: &str,
    ) -> Result<Option<T>, ServiceError> {
        let Some(raw) = self.store.hash_get(bucket, field).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Serialize and store an entry, re-arming the bucket TTL if one is set
    pub async fn put<T: Serialize>(
        &self,
        bucket: &str,
        field: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), ServiceError> {
        let raw = serde_json::to_string(value)?;
        self.store.hash_set(bucket, field, &raw).await?;
        if let Some(ttl) = ttl {
            self.store.expire(bucket, ttl).await?;
        }
        Ok(())
    }

    /// The read-through pattern used throughout the service
    ///
    /// A hit never invokes `fetch`; a miss invokes it exactly once and
    /// stores the result only when it is non-absent.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        bucket: &str,
        field: &str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> Result<Option<T>, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, ServiceError>>,
    {
        if let Some(cached) = self.get(bucket, field).await? {
            tracing::debug!(bucket, field, "cache hit");
            return Ok(Some(cached));
        }

        let Some(fresh) = fetch().await? else {
            return Ok(None);
        };
        self.put(bucket, field, &fresh, ttl).await?;
        Ok(Some(fresh))
    }
}
