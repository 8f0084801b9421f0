use axum::extract::State;
use panelgate_core::{ApiResponse, AppError};
use panelgate_models::{
    AuthData, ForgetRequest, LoginRequest, RegisterRequest, SendEmailVerifyRequest,
};
use tracing::instrument;

use super::service::PassportService;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;
use crate::validator::ValidatedJson;

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/passport/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthData),
        (status = 400, description = "Incorrect email or password"),
        (status = 403, description = "Admin login from an address outside the IP whitelist"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Passport"
)]
#[instrument(skip_all, fields(email = %dto.email, client_ip = %client_ip))]
pub async fn login(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthData>, AppError> {
    let data = PassportService::login(
        &state.db,
        state.store.as_ref(),
        &state.jwt_config,
        dto,
        &client_ip,
    )
    .await?;
    Ok(ApiResponse::success(data))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/passport/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered and logged in", body = AuthData),
        (status = 400, description = "Email taken, suffix not allowed or wrong email code"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Passport"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse<AuthData>, AppError> {
    let data =
        PassportService::register(&state.db, state.store.as_ref(), &state.jwt_config, dto).await?;
    Ok(ApiResponse::success(data))
}

/// Reset a forgotten password with an email code
#[utoipa::path(
    post,
    path = "/api/v1/passport/auth/forget",
    request_body = ForgetRequest,
    responses(
        (status = 200, description = "Password replaced", body = bool),
        (status = 400, description = "Wrong email code or unknown email"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Passport"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn forget(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ForgetRequest>,
) -> Result<ApiResponse<bool>, AppError> {
    PassportService::forget(&state.db, state.store.as_ref(), dto).await?;
    Ok(ApiResponse::success(true))
}

/// Send an email verification code
#[utoipa::path(
    post,
    path = "/api/v1/passport/comm/sendEmailVerify",
    request_body = SendEmailVerifyRequest,
    responses(
        (status = 200, description = "Code queued for delivery", body = bool),
        (status = 429, description = "A code was sent less than a minute ago"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Passport"
)]
#[instrument(skip(state, dto), fields(email = %dto.email))]
pub async fn send_email_verify(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SendEmailVerifyRequest>,
) -> Result<ApiResponse<bool>, AppError> {
    PassportService::send_email_verify(state.store.as_ref(), &state.mail_queue, dto).await?;
    Ok(ApiResponse::success(true))
}
