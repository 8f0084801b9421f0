//! # Panelgate Core
//!
//! Core types, errors, and utilities for the Panelgate API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The panel's `success`/`fail` JSON envelope
//! - [`numeric`]: Lenient integer casts for settings and query parameters
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use panelgate_core::{ApiResponse, AppError};
//!
//! async fn handler() -> Result<ApiResponse<bool>, AppError> {
//!     Ok(ApiResponse::success(true))
//! }
//! ```

pub mod errors;
pub mod numeric;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use numeric::{leading_int, truthy};
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, Envelope, ResultStatus, codes};
