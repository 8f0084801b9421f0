use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_app_config, get_config, save_app_config};

pub fn init_guest_router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/getAppConfig", get(get_app_config))
        .route("/saveAppConfig", post(save_app_config))
}
