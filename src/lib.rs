//! # Panelgate API
//!
//! Admin and user API for a proxy subscription panel, built with Axum,
//! PostgreSQL and Redis.
//!
//! ## Overview
//!
//! - **Passport**: email/password login, registration, password reset and
//!   email verification codes
//! - **Guest config**: public settings the frontend needs before login
//! - **Admin security**: IP whitelist for admin logins and admin requests
//! - **Access restriction**: customer and dashboard-only principals limited to
//!   a fixed set of admin routes
//! - **Mail queue**: verification emails sent by a background worker
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli.rs            # create-admin command
//! ├── jobs/             # SendEmailJob and the Redis-backed mail queue
//! ├── middleware/       # principal, admin gate, IP whitelist, access policy
//! ├── modules/          # Feature modules
//! │   ├── guest/        # Public configuration
//! │   ├── passport/     # Login, register, forget, sendEmailVerify
//! │   └── security/     # Admin IP whitelist
//! └── utils/            # Client IP resolution, SMTP mailer
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! Shared types live in the workspace crates:
//!
//! - [`panelgate_core`]: error type and response envelope
//! - [`panelgate_config`]: environment configuration
//! - [`panelgate_access`]: route restriction policy
//! - [`panelgate_auth`]: JWT claims and tokens
//! - [`panelgate_models`]: request and response models
//! - [`panelgate_cache`]: Redis store for settings, codes and queues
//! - [`panelgate_observability`]: logging setup and request logging
//!
//! ## Request Flow
//!
//! ```text
//! logging → CORS → attach_principal → router
//!                                       └─ /api/v2/{secure_path}:
//!                                          admin_ip_whitelist → require_admin → access_policy → handler
//! ```
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`

pub mod cli;
pub mod docs;
pub mod jobs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

