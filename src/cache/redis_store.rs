//! Redis-backed cache store
//!
//! Owns its connection lifecycle: the multiplexed connection is established
//! lazily on first use and dropped on command failure, so the next call
//! reconnects. Callers only ever see `CacheError`.

use crate::CacheError;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::Mutex;

use super::CacheStore;

pub struct RedisCache {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisCache {
    /// Creates a cache store for the given Redis URL
    ///
    /// No connection is made here; an unreachable server surfaces as a
    /// `CacheError` on the first operation instead.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            conn: Mutex::new(None),
        })
    }

    /// Returns a live connection, establishing one if needed
    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        tracing::debug!("Connected to cache store");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Drops the cached connection so the next operation reconnects
    async fn reset_connection(&self) {
        *self.conn.lock().await = None;
    }

    async fn fail<T>(&self, err: redis::RedisError) -> Result<T, CacheError> {
        self.reset_connection().await;
        Err(CacheError::Operation(err.to_string()))
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        match conn.get::<_, Option<String>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => self.fail(e).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        match conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e).await,
        }
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        match conn.del::<_, ()>(key).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e).await,
        }
    }
}
