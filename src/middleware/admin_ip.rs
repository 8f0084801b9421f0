use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use panelgate_cache::PanelStore;
use panelgate_core::{ApiResponse, codes};
use tracing::{error, warn};

use crate::utils::client_ip::{ip_allowed, resolve_client_ip};

/// State for [`admin_ip_whitelist`].
#[derive(Clone)]
pub struct AdminIpGuard {
    pub enforce: bool,
    pub store: Arc<dyn PanelStore>,
}

/// Rejects admin requests from outside the whitelisted `/24` subnets.
///
/// Inert unless `ADMIN_IP_WHITELIST_ENFORCE` is set. A whitelist that cannot
/// be read counts as empty.
pub async fn admin_ip_whitelist(
    State(guard): State<AdminIpGuard>,
    req: Request,
    next: Next,
) -> Response {
    if !guard.enforce {
        return next.run(req).await;
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = resolve_client_ip(req.headers(), peer);

    let whitelist = match guard.store.ip_whitelist().await {
        Ok(ips) => ips,
        Err(e) => {
            error!(error = %e, "Failed to read admin IP whitelist");
            Vec::new()
        }
    };

    if !ip_allowed(&client_ip, &whitelist) {
        warn!(client_ip = %client_ip, path = %req.uri().path(), "Admin IP not in whitelist");
        return ApiResponse::fail_with(codes::ADMIN_IP_DENIED).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use panelgate_cache::MemoryStore;
    use tower::ServiceExt;

    async fn app(enforce: bool, whitelist: &[&str]) -> Router {
        let store = Arc::new(MemoryStore::new());
        let ips: Vec<String> = whitelist.iter().map(|s| s.to_string()).collect();
        store.replace_ip_whitelist(&ips).await.unwrap();

        Router::new().route("/ok", get(|| async { "ok" })).layer(
            middleware::from_fn_with_state(AdminIpGuard { enforce, store }, admin_ip_whitelist),
        )
    }

    fn request(ip: &str) -> Request {
        Request::builder()
            .uri("/ok")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_not_enforced_passes() {
        let response = app(false, &[]).await.oneshot(request("1.2.3.4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_enforced_allows_same_subnet() {
        let response = app(true, &["10.0.0.1"])
            .await
            .oneshot(request("10.0.0.200"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_enforced_rejects_other_subnet() {
        let response = app(true, &["10.0.0.1"])
            .await
            .oneshot(request("10.0.1.5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
