use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use panelgate_auth::{Claims, strip_bearer, verify_token};
use panelgate_config::JwtConfig;
use panelgate_core::AppError;
use tracing::debug;

/// The authenticated user behind a request, as seen by authorization layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
}

/// Extractor for the verified token claims.
///
/// Rejects with 401 when [`attach_principal`] left the request anonymous.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .user_id()
            .ok_or_else(|| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))
    }
}

/// Verifies the `Authorization` header and attaches [`AuthUser`] and
/// [`Principal`] to the request.
///
/// Accepts `Bearer <jwt>` and the bare token. Never rejects: a missing or
/// invalid token leaves the request anonymous for later layers to judge.
pub async fn attach_principal(
    State(jwt_config): State<JwtConfig>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(strip_bearer)
        .map(str::to_string);

    if let Some(token) = token {
        match verify_token(&token, &jwt_config) {
            Ok(claims) => match claims.user_id() {
                Some(id) => {
                    req.extensions_mut().insert(Principal { id });
                    req.extensions_mut().insert(AuthUser(claims));
                }
                None => debug!("Token subject is not a user id"),
            },
            Err(e) => debug!(error = %e.error, "Ignoring invalid token"),
        }
    }

    next.run(req).await
}
