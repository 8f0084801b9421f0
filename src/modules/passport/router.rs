use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{forget, login, register, send_email_verify};

pub fn init_passport_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/forget", post(forget))
}

pub fn init_passport_comm_router() -> Router<AppState> {
    Router::new().route("/sendEmailVerify", post(send_email_verify))
}
