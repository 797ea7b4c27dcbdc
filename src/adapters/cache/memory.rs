//! In-Memory Cache Store
//!
//! Bucket-per-name hash maps with a single expiry deadline per bucket,
//! mirroring the Redis hash + EXPIRE surface the service consumes. Expiry
//! is lazy: an expired bucket is dropped the next time it is touched.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::ports::cache::{CacheError, CacheStore};

#[derive(Debug, Default)]
struct Bucket {
    fields: HashMap<String, String>,
    expires_at: Option<Instant>,
}

impl Bucket {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// In-process `CacheStore` backed by a mutexed HashMap
///
/// The mutex is only held across synchronous map operations, never an
/// await point.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_buckets<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Bucket>) -> T,
    ) -> Result<T, CacheError> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|_| CacheError::Backend("cache mutex poisoned".to_string()))?;
        Ok(f(&mut buckets))
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn hash_get(&self, bucket: &str, field: &str) -> Result<Option<String>, CacheError> {
        self.with_buckets(|buckets| {
            match buckets.get(bucket) {
                Some(b) if b.is_expired() => {
                    buckets.remove(bucket);
                    None
                }
                Some(b) => b.fields.get(field).cloned(),
                None => None,
            }
        })
    }

    async fn hash_set(&self, bucket: &str, field: &str, value: &str) -> Result<(), CacheError> {
        self.with_buckets(|buckets| {
            let entry = buckets.entry(bucket.to_string()).or_default();
            if entry.is_expired() {
                entry.fields.clear();
                entry.expires_at = None;
            }
            entry.fields.insert(field.to_string(), value.to_string());
        })
    }

    async fn expire(&self, bucket: &str, ttl: Duration) -> Result<(), CacheError> {
        self.with_buckets(|buckets| {
            if let Some(entry) = buckets.get_mut(bucket) {
                entry.expires_at = Some(Instant::now() + ttl);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryCacheStore::new();
        store.hash_set("cache:query_token", "c:1", "{}").await.unwrap();

        let value = store.hash_get("cache:query_token", "c:1").await.unwrap();
        assert_eq!(value.as_deref(), Some("{}"));

        let missing = store.hash_get("cache:query_token", "c:2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_expired_bucket_drops_all_fields() {
        let store = MemoryCacheStore::new();
        store.hash_set("bucket", "a", "1").await.unwrap();
        store.hash_set("bucket", "b", "2").await.unwrap();
        store.expire("bucket", Duration::ZERO).await.unwrap();

        assert!(store.hash_get("bucket", "a").await.unwrap().is_none());
        assert!(store.hash_get("bucket", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewrite_resets_expiry() {
        let store = MemoryCacheStore::new();
        store.hash_set("bucket", "a", "1").await.unwrap();
        store.expire("bucket", Duration::ZERO).await.unwrap();

        // A write after expiry starts the bucket over, unexpired
        store.hash_set("bucket", "a", "2").await.unwrap();
        let value = store.hash_get("bucket", "a").await.unwrap();
        assert_eq!(value.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_expire_on_missing_bucket_is_noop() {
        let store = MemoryCacheStore::new();
        assert!(store.expire("nope", Duration::from_secs(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_buckets_are_independent() {
        let store = MemoryCacheStore::new();
        store.hash_set("one", "k", "v1").await.unwrap();
        store.hash_set("two", "k", "v2").await.unwrap();
        store.expire("one", Duration::ZERO).await.unwrap();

        assert!(store.hash_get("one", "k").await.unwrap().is_none());
        assert_eq!(store.hash_get("two", "k").await.unwrap().as_deref(), Some("v2"));
    }
}
