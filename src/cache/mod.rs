//! Result cache store
//!
//! The engine persists serialized crawl results under `crawl:<seed-url>` in
//! an external key-value store. The store is an injected capability behind
//! the [`CacheStore`] trait: it owns its own connectivity and exposes only
//! `get`/`set`/`del`. Every cache failure is non-fatal to a crawl.

mod redis_store;

pub use redis_store::RedisCache;

use crate::CacheError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Key-value store interface for crawl results
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Reads a value; `Ok(None)` means the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Writes a value with a time-to-live in seconds
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Deletes a key; deleting an absent key is not an error
    async fn del(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process cache with TTL semantics
///
/// Backs tests and the no-Redis CLI configuration. Entries are evicted
/// lazily, on read.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        cache.set("crawl:a", "value", 60).await.unwrap();
        assert_eq!(cache.get("crawl:a").await.unwrap(), Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_memory_cache_missing_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("crawl:absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_cache_delete() {
        let cache = MemoryCache::new();
        cache.set("crawl:a", "value", 60).await.unwrap();
        cache.del("crawl:a").await.unwrap();
        assert_eq!(cache.get("crawl:a").await.unwrap(), None);

        // Deleting an absent key succeeds
        cache.del("crawl:never").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_cache_expiry() {
        let cache = MemoryCache::new();
        cache.set("crawl:a", "value", 0).await.unwrap();
        assert_eq!(cache.get("crawl:a").await.unwrap(), None);
    }
}
