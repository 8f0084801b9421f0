use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_ip_whitelist, save_ip_whitelist};

pub fn init_security_router() -> Router<AppState> {
    Router::new()
        .route("/getIpWhitelist", get(get_ip_whitelist))
        .route("/saveIpWhitelist", post(save_ip_whitelist))
}
