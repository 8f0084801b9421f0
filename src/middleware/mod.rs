//! Middleware and extractors for request processing.
//!
//! # Modules
//!
//! - [`auth`]: principal attachment and the `AuthUser`/`Principal` extractors
//! - [`role`]: admin gate for the admin surface
//! - [`admin_ip`]: admin IP whitelist guard
//! - [`access_policy`]: per-customer route restriction
//!
//! # Admin request flow
//!
//! 1. `attach_principal` verifies `Authorization` and stores the claims, or
//!    leaves the request anonymous
//! 2. `admin_ip_whitelist` rejects addresses outside the whitelist (when enforced)
//! 3. `require_admin` rejects anonymous and non-admin callers
//! 4. `access_policy` narrows restricted admins to their tier's routes
//! 5. The handler runs

pub mod access_policy;
pub mod admin_ip;
pub mod auth;
pub mod role;
