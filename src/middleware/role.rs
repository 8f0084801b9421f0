//! Admin gate.

use axum::{extract::Request, middleware::Next, response::Response};
use panelgate_core::AppError;

use crate::middleware::auth::AuthUser;

/// Rejects anonymous callers with 401 and non-admins with 403.
///
/// # Example
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/security/getIpWhitelist", get(get_ip_whitelist))
///     .layer(middleware::from_fn(require_admin));
/// ```
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    if !auth_user.is_admin() {
        return Err(AppError::forbidden(
            "Access denied. Admin privileges required".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
