use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::ApiResponse;

/// Handler error rendered as the panel's failure envelope.
///
/// `code` defaults to the HTTP status. Panel-specific codes such as `403001`
/// are set with [`AppError::coded`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: u32,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code: u32::from(status.as_u16()),
            error: err.into(),
        }
    }

    /// Error carrying a panel code; the HTTP status comes from its first three digits.
    pub fn coded(code: u32, message: impl Into<String>) -> Self {
        Self {
            status: crate::response::http_status_for_code(code),
            code,
            error: anyhow::anyhow!(message.into()),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn too_many_requests(message: String) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, anyhow::anyhow!(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "Request failed");
        }

        ApiResponse::fail(self.code, self.error.to_string())
            .with_http_status(self.status)
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_status_as_code() {
        let err = AppError::bad_request(anyhow::anyhow!("Email already exists"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_coded_derives_status() {
        let err = AppError::coded(403001, "denied");
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, 403001);
        assert_eq!(err.error.to_string(), "denied");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::unauthorized("Invalid or expired token".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
