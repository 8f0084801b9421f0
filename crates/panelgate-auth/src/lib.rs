//! # Panelgate Auth
//!
//! Authentication types and JWT utilities for the Panelgate API.
//!
//! - [`claims`]: access token claim structure
//! - [`jwt`]: token creation and verification
//!
//! Tokens identify a [`Principal`](claims::Claims::user_id) by its numeric user
//! ID and carry the `is_admin` flag used to gate the admin surface.
//!
//! # Example
//!
//! ```ignore
//! use panelgate_auth::{create_access_token, verify_token};
//! use panelgate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, "user@example.com", false, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id(), Some(42));
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{bearer, create_access_token, strip_bearer, verify_token};
