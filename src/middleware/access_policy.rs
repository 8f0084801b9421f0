//! Per-customer route restriction on the admin surface.
//!
//! Wraps [`panelgate_access::AccessPolicy`] as axum middleware. The policy
//! itself is pure; this layer gathers the request facts and renders the
//! decision.
//!
//! Paging for the empty `user/fetch` page is read from the query string and
//! then from a JSON object body, the body winning, since the admin UI posts
//! its list filters as JSON.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    body::to_bytes,
    extract::{OriginalUri, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use panelgate_access::{AccessPolicy, Decision, EmptyPage, RequestFacts};
use panelgate_core::{ApiResponse, codes};
use serde_json::Value;
use tracing::debug;

use crate::middleware::auth::Principal;

const CURRENT: &str = "current";
const PAGE_SIZE: &str = "pageSize";

/// Largest body read when looking for paging values.
const PAGING_BODY_LIMIT: usize = 64 * 1024;

/// Applies the access policy to the current principal and path.
///
/// Must run after [`crate::middleware::auth::attach_principal`]; requests
/// without a [`Principal`] pass straight through.
pub async fn access_policy(
    State(policy): State<Arc<AccessPolicy>>,
    req: Request,
    next: Next,
) -> Response {
    let principal_id = req.extensions().get::<Principal>().map(|p| p.id);
    let mut paging = Query::<HashMap<String, String>>::try_from_uri(req.uri())
        .map(|Query(params)| params)
        .unwrap_or_default();

    // Nested routers strip their prefix from `req.uri()`; match on the full path.
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let decision = policy.evaluate(
        &RequestFacts::new(principal_id, &path).with_paging(
            paging.get(CURRENT).map(String::as_str),
            paging.get(PAGE_SIZE).map(String::as_str),
        ),
    );

    match decision {
        Decision::Pass(_) => next.run(req).await,
        Decision::EmptyUserPage(page) => {
            let body_paging = json_paging(req).await;
            if body_paging.is_empty() {
                return (StatusCode::OK, Json(page)).into_response();
            }

            paging.extend(body_paging);
            let page = EmptyPage::echo(
                paging.get(CURRENT).map(String::as_str),
                paging.get(PAGE_SIZE).map(String::as_str),
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Decision::EmptyList => ApiResponse::success(Vec::<()>::new()).into_response(),
        Decision::Deny => ApiResponse::fail_with(codes::NO_PERMISSION)
            .with_http_status(StatusCode::OK)
            .into_response(),
    }
}

/// `current` and `pageSize` from a JSON object body. Anything unreadable yields none.
async fn json_paging(req: Request) -> HashMap<String, String> {
    let bytes = match to_bytes(req.into_body(), PAGING_BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(error = %e, "Skipping unreadable body for paging");
            return HashMap::new();
        }
    };

    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&bytes) else {
        return HashMap::new();
    };

    fields
        .into_iter()
        .filter(|(key, _)| key == CURRENT || key == PAGE_SIZE)
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            _ => None,
        })
        .collect()
}
