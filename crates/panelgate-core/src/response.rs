//! The panel's JSON response envelope.
//!
//! Every panel endpoint answers with the same outer shape:
//!
//! ```json
//! { "status": "success", "message": "操作成功", "data": { ... }, "error": null }
//! { "status": "fail", "code": 403001, "message": "...", "data": null, "error": null }
//! ```
//!
//! Failures carry a numeric panel code. The HTTP status of a failure is derived
//! from the first three digits of that code (`403001` → `403`), unless the
//! caller overrides it with [`ApiResponse::with_http_status`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Well-known `(code, message)` pairs used across the panel.
pub mod codes {
    /// Generic success.
    pub const HTTP_OK: (u32, &str) = (200, "操作成功");
    /// Restricted principal requested a route outside its whitelist.
    pub const NO_PERMISSION: (u32, &str) = (403001, "无权限访问此功能");
    /// Admin login attempted from an address outside the IP whitelist.
    pub const ADMIN_LOGIN_IP_DENIED: (u32, &str) = (403, "管理员登录 IP 不在白名单中");
    /// Admin request from an address outside the IP whitelist.
    pub const ADMIN_IP_DENIED: (u32, &str) = (403, "管理员 IP 不在白名单中");
}

/// Outcome marker serialized as `"success"` or `"fail"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Fail,
}

/// Serialized body of every panel response.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: ResultStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    pub message: String,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// An [`Envelope`] paired with the HTTP status it is sent with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    http_status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps `data` in a success envelope sent with HTTP 200.
    pub fn success(data: T) -> Self {
        let (_, message) = codes::HTTP_OK;
        Self {
            http_status: StatusCode::OK,
            envelope: Envelope {
                status: ResultStatus::Success,
                code: None,
                message: message.to_string(),
                data: Some(data),
                error: None,
            },
        }
    }

    /// Overrides the HTTP status while keeping the body untouched.
    #[must_use]
    pub fn with_http_status(mut self, status: StatusCode) -> Self {
        self.http_status = status;
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.http_status
    }

    pub fn envelope(&self) -> &Envelope<T> {
        &self.envelope
    }
}

impl ApiResponse<()> {
    /// Builds a failure envelope for a panel code.
    pub fn fail(code: u32, message: impl Into<String>) -> Self {
        Self {
            http_status: http_status_for_code(code),
            envelope: Envelope {
                status: ResultStatus::Fail,
                code: Some(code),
                message: message.into(),
                data: None,
                error: None,
            },
        }
    }

    /// Builds a failure envelope from one of the [`codes`] constants.
    pub fn fail_with((code, message): (u32, &str)) -> Self {
        Self::fail(code, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.http_status, Json(self.envelope)).into_response()
    }
}

/// Maps a panel code to an HTTP status using its first three digits.
///
/// Codes that do not start with a valid status map to 500.
pub fn http_status_for_code(code: u32) -> StatusCode {
    let digits = code.to_string();
    digits
        .get(..3)
        .and_then(|prefix| prefix.parse::<u16>().ok())
        .and_then(|status| StatusCode::from_u16(status).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_http_status_for_code() {
        assert_eq!(http_status_for_code(403001), StatusCode::FORBIDDEN);
        assert_eq!(http_status_for_code(403), StatusCode::FORBIDDEN);
        assert_eq!(http_status_for_code(500), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(http_status_for_code(4220), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(http_status_for_code(42), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_success_envelope_shape() {
        let response = ApiResponse::success(vec![1, 2]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "message": "操作成功", "data": [1, 2], "error": null})
        );
    }

    #[tokio::test]
    async fn test_fail_envelope_carries_code() {
        let response = ApiResponse::fail_with(codes::NO_PERMISSION).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "fail",
                "code": 403001,
                "message": "无权限访问此功能",
                "data": null,
                "error": null
            })
        );
    }

    #[test]
    fn test_with_http_status_keeps_body() {
        let response = ApiResponse::fail_with(codes::NO_PERMISSION).with_http_status(StatusCode::OK);
        assert_eq!(response.http_status(), StatusCode::OK);
        assert_eq!(response.envelope().code, Some(403001));
        assert_eq!(response.envelope().status, ResultStatus::Fail);
    }
}
