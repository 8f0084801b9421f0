use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::{CacheConfig, CacheError, Keys, RedisCache};

/// Panel state kept outside the database.
///
/// Handlers, middleware and the mail worker only talk to this trait, so the
/// Redis backend can be swapped for [`crate::MemoryStore`] in tests.
#[async_trait]
pub trait PanelStore: Send + Sync {
    // Admin IP whitelist

    async fn ip_whitelist(&self) -> Result<Vec<String>, CacheError>;
    /// Replaces the whole whitelist. An empty slice clears it.
    async fn replace_ip_whitelist(&self, ips: &[String]) -> Result<(), CacheError>;

    // Settings

    async fn settings(&self) -> Result<HashMap<String, String>, CacheError>;
    async fn save_settings(&self, values: &[(String, String)]) -> Result<(), CacheError>;

    // Email verification codes

    async fn email_code(&self, email: &str) -> Result<Option<String>, CacheError>;
    async fn put_email_code(&self, email: &str, code: &str, ttl: Duration)
    -> Result<(), CacheError>;
    async fn forget_email_code(&self, email: &str) -> Result<(), CacheError>;
    async fn email_code_recently_sent(&self, email: &str) -> Result<bool, CacheError>;
    async fn mark_email_code_sent(&self, email: &str, ttl: Duration) -> Result<(), CacheError>;

    // Job queues

    async fn push_job(&self, queue: &str, payload: &str) -> Result<(), CacheError>;
    /// Oldest payload on `queue`, waiting up to `timeout` for one to arrive.
    async fn pop_job(&self, queue: &str, timeout: Duration) -> Result<Option<String>, CacheError>;
}

/// [`PanelStore`] backed by Redis.
#[derive(Debug, Clone)]
pub struct RedisStore {
    cache: RedisCache,
    keys: Keys,
}

impl RedisStore {
    pub fn new(cache: RedisCache, keys: Keys) -> Self {
        Self { cache, keys }
    }

    /// Connects using `REDIS_URL` and `CACHE_PREFIX` from `config`.
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        let cache = RedisCache::new(
            &config.redis_url,
            Duration::from_secs(config.default_ttl_seconds),
        )
        .await?;
        Ok(Self::new(cache, Keys::new(config.clone())))
    }
}

#[async_trait]
impl PanelStore for RedisStore {
    #[instrument(skip(self))]
    async fn ip_whitelist(&self) -> Result<Vec<String>, CacheError> {
        self.cache.members(&self.keys.ip_whitelist()).await
    }

    #[instrument(skip(self, ips))]
    async fn replace_ip_whitelist(&self, ips: &[String]) -> Result<(), CacheError> {
        self.cache.replace_set(&self.keys.ip_whitelist(), ips).await
    }

    async fn settings(&self) -> Result<HashMap<String, String>, CacheError> {
        self.cache.hash_all(&self.keys.settings()).await
    }

    async fn save_settings(&self, values: &[(String, String)]) -> Result<(), CacheError> {
        self.cache.hash_set_many(&self.keys.settings(), values).await
    }

    async fn email_code(&self, email: &str) -> Result<Option<String>, CacheError> {
        Ok(self.cache.get(&self.keys.email_code(email)).await)
    }

    async fn put_email_code(
        &self,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.cache
            .set_with_ttl(&self.keys.email_code(email), &code, ttl)
            .await
    }

    async fn forget_email_code(&self, email: &str) -> Result<(), CacheError> {
        self.cache.invalidate(&self.keys.email_code(email)).await
    }

    async fn email_code_recently_sent(&self, email: &str) -> Result<bool, CacheError> {
        self.cache.exists(&self.keys.email_code_sent(email)).await
    }

    async fn mark_email_code_sent(&self, email: &str, ttl: Duration) -> Result<(), CacheError> {
        self.cache
            .set_with_ttl(&self.keys.email_code_sent(email), &1, ttl)
            .await
    }

    async fn push_job(&self, queue: &str, payload: &str) -> Result<(), CacheError> {
        self.cache.push(&self.keys.queue(queue), payload).await
    }

    async fn pop_job(&self, queue: &str, timeout: Duration) -> Result<Option<String>, CacheError> {
        self.cache.pop_blocking(&self.keys.queue(queue), timeout).await
    }
}
