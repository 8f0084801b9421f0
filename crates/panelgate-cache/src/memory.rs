//! In-process [`PanelStore`].
//!
//! Backs integration tests and local experiments without Redis. TTLs are
//! tracked with [`Instant`] deadlines and checked on read.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{CacheError, PanelStore};

#[derive(Debug, Default)]
struct Inner {
    ip_whitelist: BTreeSet<String>,
    settings: HashMap<String, String>,
    email_codes: HashMap<String, (String, Instant)>,
    sent_markers: HashMap<String, Instant>,
    queues: HashMap<String, VecDeque<String>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with settings.
    pub fn with_settings<I, K, V>(settings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.lock().settings = settings
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        store
    }

    /// Number of payloads waiting on `queue`.
    pub fn queue_len(&self, queue: &str) -> usize {
        self.lock().queues.get(queue).map_or(0, VecDeque::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-update.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PanelStore for MemoryStore {
    async fn ip_whitelist(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock().ip_whitelist.iter().cloned().collect())
    }

    async fn replace_ip_whitelist(&self, ips: &[String]) -> Result<(), CacheError> {
        self.lock().ip_whitelist = ips.iter().cloned().collect();
        Ok(())
    }

    async fn settings(&self) -> Result<HashMap<String, String>, CacheError> {
        Ok(self.lock().settings.clone())
    }

    async fn save_settings(&self, values: &[(String, String)]) -> Result<(), CacheError> {
        self.lock().settings.extend(values.iter().cloned());
        Ok(())
    }

    async fn email_code(&self, email: &str) -> Result<Option<String>, CacheError> {
        let inner = self.lock();
        Ok(inner
            .email_codes
            .get(email)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(code, _)| code.clone()))
    }

    async fn put_email_code(
        &self,
        email: &str,
        code: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.lock()
            .email_codes
            .insert(email.to_string(), (code.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn forget_email_code(&self, email: &str) -> Result<(), CacheError> {
        self.lock().email_codes.remove(email);
        Ok(())
    }

    async fn email_code_recently_sent(&self, email: &str) -> Result<bool, CacheError> {
        Ok(self
            .lock()
            .sent_markers
            .get(email)
            .is_some_and(|deadline| *deadline > Instant::now()))
    }

    async fn mark_email_code_sent(&self, email: &str, ttl: Duration) -> Result<(), CacheError> {
        self.lock()
            .sent_markers
            .insert(email.to_string(), Instant::now() + ttl);
        Ok(())
    }

    async fn push_job(&self, queue: &str, payload: &str) -> Result<(), CacheError> {
        self.lock()
            .queues
            .entry(queue.to_string())
            .or_default()
            .push_back(payload.to_string());
        Ok(())
    }

    async fn pop_job(&self, queue: &str, timeout: Duration) -> Result<Option<String>, CacheError> {
        let popped = self
            .lock()
            .queues
            .get_mut(queue)
            .and_then(VecDeque::pop_front);

        if popped.is_none() {
            tokio::time::sleep(timeout).await;
        }
        Ok(popped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_whitelist() {
        let store = MemoryStore::new();
        store
            .replace_ip_whitelist(&["10.0.0.1".to_string(), "10.0.0.1".to_string()])
            .await
            .unwrap();
        assert_eq!(store.ip_whitelist().await.unwrap(), vec!["10.0.0.1"]);

        store.replace_ip_whitelist(&[]).await.unwrap();
        assert!(store.ip_whitelist().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_email_code_expires() {
        let store = MemoryStore::new();
        store
            .put_email_code("a@b.com", "123456", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            store.email_code("a@b.com").await.unwrap().as_deref(),
            Some("123456")
        );

        store
            .put_email_code("a@b.com", "654321", Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(store.email_code("a@b.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_queue_is_fifo() {
        let store = MemoryStore::new();
        store.push_job("q", "1").await.unwrap();
        store.push_job("q", "2").await.unwrap();
        assert_eq!(store.queue_len("q"), 2);

        let first = store.pop_job("q", Duration::ZERO).await.unwrap();
        assert_eq!(first.as_deref(), Some("1"));
        assert_eq!(store.queue_len("q"), 1);
    }

    #[tokio::test]
    async fn test_pop_empty_queue_times_out() {
        let store = MemoryStore::new();
        let popped = store
            .pop_job("empty", Duration::from_millis(5))
            .await
            .unwrap();
        assert!(popped.is_none());
    }

    #[tokio::test]
    async fn test_save_settings_merges() {
        let store = MemoryStore::with_settings([("app_url", "https://a")]);
        store
            .save_settings(&[("logo".to_string(), "l.png".to_string())])
            .await
            .unwrap();
        let settings = store.settings().await.unwrap();
        assert_eq!(settings.get("app_url").map(String::as_str), Some("https://a"));
        assert_eq!(settings.get("logo").map(String::as_str), Some("l.png"));
    }
}
