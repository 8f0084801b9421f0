use axum::{Json, extract::State};
use panelgate_core::{ApiResponse, AppError};
use panelgate_models::{AppConfigResponse, GuestConfig, SaveAppConfigRequest};
use tracing::instrument;

use super::service::GuestService;
use crate::state::AppState;

/// Public configuration for the sign-in and registration pages
#[utoipa::path(
    get,
    path = "/api/v1/guest/comm/config",
    responses(
        (status = 200, description = "Guest configuration", body = GuestConfig),
    ),
    tag = "Guest"
)]
#[instrument(skip(state))]
pub async fn get_config(State(state): State<AppState>) -> Result<ApiResponse<GuestConfig>, AppError> {
    let config = GuestService::guest_config(state.store.as_ref()).await?;
    Ok(ApiResponse::success(config))
}

/// Client download versions and links
#[utoipa::path(
    get,
    path = "/api/v1/guest/comm/getAppConfig",
    responses(
        (status = 200, description = "Client app configuration", body = AppConfigResponse),
    ),
    tag = "Guest"
)]
#[instrument(skip(state))]
pub async fn get_app_config(
    State(state): State<AppState>,
) -> Result<ApiResponse<AppConfigResponse>, AppError> {
    let config = GuestService::app_config(state.store.as_ref()).await?;
    Ok(ApiResponse::success(config))
}

/// Update client download versions and links
///
/// Unauthenticated; only the known client keys are stored.
#[utoipa::path(
    post,
    path = "/api/v1/guest/comm/saveAppConfig",
    request_body = SaveAppConfigRequest,
    responses(
        (status = 200, description = "Saved", body = bool),
    ),
    tag = "Guest"
)]
#[instrument(skip(state, request))]
pub async fn save_app_config(
    State(state): State<AppState>,
    Json(request): Json<SaveAppConfigRequest>,
) -> Result<ApiResponse<bool>, AppError> {
    GuestService::save_app_config(state.store.as_ref(), request).await?;
    Ok(ApiResponse::success(true))
}
