//! Panelgate observability.
//!
//! - Console logging with an optional daily rolling JSON file
//! - HTTP request logging middleware tagging each request with an id
//!
//! # Examples
//!
//! ```no_run
//! use panelgate_observability::{LoggingConfig, init_logging};
//!
//! let _guard = init_logging(&LoggingConfig::from_env());
//! ```

pub mod logging;
pub mod middleware;

pub use logging::{LoggingConfig, init_logging};
pub use middleware::{RequestId, logging_middleware};
