use axum::http::{HeaderValue, Method};
use axum::response::IntoResponse;
use axum::{Router, middleware};
use panelgate_core::ApiResponse;
use panelgate_observability::logging_middleware;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::access_policy::access_policy;
use crate::middleware::admin_ip::admin_ip_whitelist;
use crate::middleware::auth::attach_principal;
use crate::middleware::role::require_admin;
use crate::modules::guest::init_guest_router;
use crate::modules::passport::{init_passport_auth_router, init_passport_comm_router};
use crate::modules::security::init_security_router;
use crate::state::AppState;

/// Unknown admin routes still pass through the admin layers, so restricted
/// principals get their policy answer before the 404.
async fn admin_fallback() -> impl IntoResponse {
    ApiResponse::fail(404, "Not Found")
}

/// Admin surface. Layers run outermost first: IP whitelist, admin gate,
/// access policy.
fn init_admin_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/security", init_security_router())
        .fallback(admin_fallback)
        .layer(middleware::from_fn_with_state(
            state.access_policy.clone(),
            access_policy,
        ))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.admin_ip_guard(),
            admin_ip_whitelist,
        ))
}

pub fn init_router(state: AppState) -> Router {
    let admin_path = format!("/api/v2/{}", state.security_config.secure_path);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api/v1",
            Router::new()
                .nest("/guest/comm", init_guest_router())
                .nest("/passport/auth", init_passport_auth_router())
                .nest("/passport/comm", init_passport_comm_router()),
        )
        .nest(&admin_path, init_admin_router(&state))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.jwt_config.clone(),
            attach_principal,
        ))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
