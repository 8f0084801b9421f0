//! # Panelgate Models
//!
//! Domain models and DTOs for the Panelgate API.
//!
//! # Modules
//!
//! - [`users`]: the `users` row
//! - [`auth`]: login, registration, password reset and email codes
//! - [`settings`]: guest configuration and client app settings
//! - [`security`]: admin IP whitelist
//! - [`mail`]: queued email parameters

pub mod auth;
pub mod mail;
pub mod security;
pub mod settings;
pub mod users;

pub use auth::{AuthData, ForgetRequest, LoginRequest, RegisterRequest, SendEmailVerifyRequest};
pub use mail::SendEmailParams;
pub use security::{IpWhitelistRequest, IpWhitelistResponse};
pub use settings::{
    APP_CONFIG_KEYS, AppClientConfig, AppConfigResponse, DEFAULT_EMAIL_SUFFIXES, EmailWhitelistSuffix,
    GuestConfig, SaveAppConfigRequest, Settings,
};
pub use users::User;
