use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::cache::{CacheError, CacheStore};
use crate::adapters::cache::MemoryCacheStore;

/// A recorded cache store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheCall {
    HashGet { bucket: String, field: String },
    HashSet { bucket: String, field: String },
    Expire { bucket: String, ttl_secs: u64 },
}

/// Cache store double that records every call while delegating to an
/// in-memory store, so tests can assert on access patterns
#[derive(Default)]
pub struct RecordingCacheStore {
    inner: MemoryCacheStore,
    calls: Arc<Mutex<Vec<CacheCall>>>,
}

impl RecordingCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CacheCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    /// Count of writes recorded for a bucket
    pub fn write_count(&self, bucket: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, CacheCall::HashSet { bucket: b, .. } if b == bucket))
            .count()
    }

    fn record(&self, call: CacheCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

#[async_trait]
impl CacheStore for RecordingCacheStore {
    async fn hash_get(&self, bucket: &str, field: &str) -> Result<Option<String>, CacheError> {
        self.record(CacheCall::HashGet {
            bucket: bucket.to_string(),
            field: field.to_string(),
        });
        self.inner.hash_get(bucket, field).await
    }

    async fn hash_set(&self, bucket: &str, field: &str, value: &str) -> Result<(), CacheError> {
        self.record(CacheCall::HashSet {
            bucket: bucket.to_string(),
            field: field.to_string(),
        });
        self.inner.hash_set(bucket, field, value).await
    }

    async fn expire(&self, bucket: &str, ttl: Duration) -> Result<(), CacheError> {
        self.record(CacheCall::Expire {
            bucket: bucket.to_string(),
            ttl_secs: ttl.as_secs(),
        });
        self.inner.expire(bucket, ttl).await
    }
}
