//! # Panelgate Config
//!
//! Configuration types for the Panelgate API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`email`]: Email/SMTP configuration
//! - [`restriction`]: Restricted principal ID lists (`CUSTOMER_IDS`, `DASHBOARD_ONLY_IDS`)
//! - [`security`]: Admin surface location and IP whitelist enforcement
//!
//! All of them are read once at startup and never reloaded.
//!
//! # Example
//!
//! ```ignore
//! use panelgate_config::{JwtConfig, RestrictionConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let restriction = RestrictionConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod restriction;
pub mod security;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use restriction::{RestrictionConfig, parse_id_list};
pub use security::SecurityConfig;
