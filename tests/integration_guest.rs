mod common;

use std::sync::Arc;

use axum::{Router, http::StatusCode};
use common::{body_json, get, post_json, restriction, test_state};
use panelgate::router::init_router;
use panelgate_cache::{MemoryStore, PanelStore};
use panelgate_config::SecurityConfig;
use serde_json::json;
use tower::ServiceExt;

fn app_with(store: Arc<MemoryStore>) -> Router {
    init_router(test_state(store, SecurityConfig::default(), &restriction()))
}

#[tokio::test]
async fn test_guest_config_defaults() {
    let response = app_with(Arc::new(MemoryStore::new()))
        .oneshot(get("/api/v1/guest/comm/config", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");

    let data = &body["data"];
    assert_eq!(data["is_email_verify"], 0);
    assert_eq!(data["email_whitelist_suffix"], 0);
    assert_eq!(data["is_captcha"], 0);
    assert_eq!(data["captcha_type"], "recaptcha");
    assert_eq!(data["recaptcha_v3_score_threshold"], 0.5);
    assert!(data["tos_url"].is_null());
}

#[tokio::test]
async fn test_guest_config_reads_settings() {
    let store = Arc::new(MemoryStore::with_settings([
        ("email_verify", "1"),
        ("email_whitelist_enable", "1"),
        ("email_whitelist_suffix", "gmail.com, qq.com"),
        ("captcha_enable", "1"),
        ("captcha_type", "turnstile"),
        ("app_url", "https://panel.example.com"),
    ]));
    let response = app_with(store)
        .oneshot(get("/api/v1/guest/comm/config", None))
        .await
        .unwrap();

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["is_email_verify"], 1);
    assert_eq!(data["email_whitelist_suffix"], json!(["gmail.com", "qq.com"]));
    assert_eq!(data["is_captcha"], 1);
    assert_eq!(data["is_recaptcha"], 1);
    assert_eq!(data["captcha_type"], "turnstile");
    assert_eq!(data["app_url"], "https://panel.example.com");
}

#[tokio::test]
async fn test_app_config_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/guest/comm/saveAppConfig",
            None,
            &json!({"windows_version": "1.2.0", "android_download_url": "https://dl.example.com/a.apk"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let settings = store.settings().await.unwrap();
    assert_eq!(settings.get("windows_version").map(String::as_str), Some("1.2.0"));
    assert!(!settings.contains_key("macos_version"));

    let response = app
        .oneshot(get("/api/v1/guest/comm/getAppConfig", None))
        .await
        .unwrap();
    let app_config = body_json(response).await["data"]["app"].clone();
    assert_eq!(app_config["windows_version"], "1.2.0");
    assert_eq!(app_config["android_download_url"], "https://dl.example.com/a.apk");
    assert_eq!(app_config["macos_version"], "");
}

#[tokio::test]
async fn test_guest_routes_ignore_restriction() {
    let auth = common::bearer_for(common::DASHBOARD_ID, true);
    let response = app_with(Arc::new(MemoryStore::new()))
        .oneshot(get("/api/v1/guest/comm/config", Some(&auth)))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["status"], "success");
}
