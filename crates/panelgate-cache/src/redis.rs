//! Redis client.
//!
//! Thin async wrapper over a [`ConnectionManager`] exposing the string, set,
//! hash and list operations the panel uses.

use std::collections::HashMap;
use std::time::Duration;

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Redis client with a shared, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RedisCache {
    /// Creates a new Redis client.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if connection fails.
    pub async fn new(redis_url: &str, default_ttl: Duration) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, default_ttl })
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Gets a JSON value by key.
    ///
    /// Returns `None` if the key doesn't exist or deserialization fails.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!(cache.key = %key, "Cache hit");
                match serde_json::from_str(&value) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        error!(cache.key = %key, error = %e, "Failed to deserialize cached value");
                        None
                    }
                }
            }
            Ok(None) => {
                debug!(cache.key = %key, "Cache miss");
                None
            }
            Err(e) => {
                error!(cache.key = %key, error = %e, "Redis GET error");
                None
            }
        }
    }

    /// Sets a JSON value with a custom TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set_with_ttl<T>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;

        conn.set_ex::<_, _, ()>(key, json, ttl.as_secs()).await?;

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Cache set");

        Ok(())
    }

    /// Sets a JSON value with the default TTL.
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Deletes a key.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache invalidated");

        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "EXISTS"))]
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.exists::<_, bool>(key).await?)
    }

    #[instrument(skip(self), fields(cache.operation = "SMEMBERS"))]
    pub async fn members(&self, key: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.smembers::<_, Vec<String>>(key).await?)
    }

    /// Replaces a set atomically. An empty `members` leaves the key deleted.
    #[instrument(skip(self, members), fields(cache.operation = "DEL+SADD", cache.count = members.len()))]
    pub async fn replace_set(&self, key: &str, members: &[String]) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !members.is_empty() {
            pipe.sadd(key, members).ignore();
        }
        let _: () = pipe.query_async(&mut conn).await?;

        debug!(cache.key = %key, "Set replaced");

        Ok(())
    }

    #[instrument(skip(self), fields(cache.operation = "HGETALL"))]
    pub async fn hash_all(&self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.hgetall::<_, HashMap<String, String>>(key).await?)
    }

    #[instrument(skip(self, fields), fields(cache.operation = "HSET"))]
    pub async fn hash_set_many(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<(), CacheError> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        conn.hset_multiple::<_, _, _, ()>(key, fields).await?;
        Ok(())
    }

    #[instrument(skip(self, value), fields(cache.operation = "LPUSH"))]
    pub async fn push(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.lpush::<_, _, ()>(key, value).await?;
        Ok(())
    }

    /// Blocking pop from the tail of a list. `None` when `timeout` elapses.
    pub async fn pop_blocking(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let popped: Option<(String, String)> =
            conn.brpop(key, timeout.as_secs_f64()).await?;
        Ok(popped.map(|(_, value)| value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a running Redis instance

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_set_and_get() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();

        cache.set("panelgate:test:key", &"123456").await.unwrap();

        let retrieved: Option<String> = cache.get("panelgate:test:key").await;
        assert_eq!(retrieved.as_deref(), Some("123456"));

        cache.invalidate("panelgate:test:key").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_replace_set() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();
        let key = "panelgate:test:set";

        cache
            .replace_set(key, &["1.1.1.1".to_string(), "2.2.2.2".to_string()])
            .await
            .unwrap();
        let mut members = cache.members(key).await.unwrap();
        members.sort();
        assert_eq!(members, vec!["1.1.1.1", "2.2.2.2"]);

        cache.replace_set(key, &[]).await.unwrap();
        assert!(!cache.exists(key).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires Redis"]
    async fn test_push_and_pop() {
        let cache = RedisCache::new("redis://localhost:6379", Duration::from_secs(60))
            .await
            .unwrap();
        let key = "panelgate:test:queue";

        cache.push(key, "first").await.unwrap();
        cache.push(key, "second").await.unwrap();

        let popped = cache.pop_blocking(key, Duration::from_secs(1)).await.unwrap();
        assert_eq!(popped.as_deref(), Some("first"));
        cache.invalidate(key).await.unwrap();
    }
}
