//! Key builders.
//!
//! Every Redis key the panel touches is built here so the API and the worker
//! agree on names.

use crate::CacheConfig;

/// Builds keys under a configured prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keys {
    config: CacheConfig,
}

impl Keys {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    fn build(&self, parts: &[&str]) -> String {
        self.config.prefixed_key(&parts.join(":"))
    }

    /// Set of whitelisted admin IPs.
    pub fn ip_whitelist(&self) -> String {
        self.build(&["admin", "ip_whitelist"])
    }

    /// Hash of panel settings.
    pub fn settings(&self) -> String {
        self.build(&["settings"])
    }

    /// Pending verification code for an email address.
    pub fn email_code(&self, email: &str) -> String {
        self.build(&["email_code", email])
    }

    /// Marker that blocks a new code while it exists.
    pub fn email_code_sent(&self, email: &str) -> String {
        self.build(&["email_code_sent", email])
    }

    /// List backing a named job queue.
    pub fn queue(&self, name: &str) -> String {
        self.build(&["queue", name])
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
