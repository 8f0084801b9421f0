//! Passport DTOs.
//!
//! Request bodies for login, registration, password reset and the email
//! verification code, plus the auth payload handed back to the panel.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Registration request.
///
/// `email_code` is only checked when email verification is switched on in the
/// settings.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    #[schema(example = "password123")]
    pub password: String,
    #[serde(default)]
    pub email_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ForgetRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "123456")]
    pub email_code: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendEmailVerifyRequest {
    #[validate(email)]
    pub email: String,
}

/// Returned by login and registration.
///
/// `auth_data` is the full `Authorization` header value the panel stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthData {
    pub token: String,
    pub is_admin: bool,
    #[schema(example = "Bearer eyJhbGciOiJIUzI1NiJ9...")]
    pub auth_data: String,
}
