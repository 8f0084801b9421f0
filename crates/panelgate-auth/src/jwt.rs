//! JWT utilities for authentication.
//!
//! Access tokens are HS256 JWTs signed with `JWT_SECRET`. The panel frontend
//! sends them back as `Authorization: Bearer <token>`; the login response
//! also hands out that full header value as `auth_data`.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use panelgate_config::JwtConfig;
use panelgate_core::AppError;

use crate::claims::Claims;

/// Creates an access token for a user.
///
/// # Errors
///
/// Returns an error if token encoding fails (e.g., invalid secret key).
pub fn create_access_token(
    user_id: i64,
    email: &str,
    is_admin: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        is_admin,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

/// Formats a token as an `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Extracts the token from an `Authorization` value.
///
/// Accepts both `Bearer <token>` and a bare token.
pub fn strip_bearer(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() { None } else { Some(token) }
}
