use axum::extract::State;
use panelgate_core::{ApiResponse, AppError};
use panelgate_models::{IpWhitelistRequest, IpWhitelistResponse};
use tracing::instrument;

use super::service::SecurityService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List whitelisted admin IPs
#[utoipa::path(
    get,
    path = "/api/v2/admin/security/getIpWhitelist",
    responses(
        (status = 200, description = "Whitelisted IPs, sorted", body = IpWhitelistResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Security"
)]
#[instrument(skip(state))]
pub async fn get_ip_whitelist(
    State(state): State<AppState>,
) -> Result<ApiResponse<IpWhitelistResponse>, AppError> {
    let ips = SecurityService::ip_whitelist(state.store.as_ref()).await?;
    Ok(ApiResponse::success(IpWhitelistResponse(ips)))
}

/// Replace the admin IP whitelist
///
/// Entries are trimmed, blanks dropped and duplicates removed; matching is
/// by `/24` subnet.
#[utoipa::path(
    post,
    path = "/api/v2/admin/security/saveIpWhitelist",
    request_body = IpWhitelistRequest,
    responses(
        (status = 200, description = "Saved", body = bool),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin privileges required"),
        (status = 422, description = "`ips` missing or empty"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Security"
)]
#[instrument(skip(state, auth_user, request), fields(admin = %auth_user.email()))]
pub async fn save_ip_whitelist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<IpWhitelistRequest>,
) -> Result<ApiResponse<bool>, AppError> {
    SecurityService::save_ip_whitelist(state.store.as_ref(), &request.ips).await?;
    Ok(ApiResponse::success(true))
}
