//! # Panelgate Cache
//!
//! Redis-backed state shared by the Panelgate API and its worker.
//!
//! This crate provides:
//! - Redis connection management ([`RedisCache`])
//! - Cache configuration from environment variables
//! - Key builders for every structure the panel keeps in Redis
//! - The [`PanelStore`] trait over that state, with a Redis implementation
//!   and an in-memory [`MemoryStore`] for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use panelgate_cache::{CacheConfig, PanelStore, RedisStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CacheConfig::from_env();
//!     let store = RedisStore::connect(&config).await.unwrap();
//!
//!     let whitelist = store.ip_whitelist().await.unwrap();
//! }
//! ```

pub mod config;
pub mod keys;
pub mod memory;
pub mod redis;
pub mod store;

pub use config::CacheConfig;
pub use keys::Keys;
pub use memory::MemoryStore;
pub use redis::{CacheError, RedisCache};
pub use store::{PanelStore, RedisStore};
