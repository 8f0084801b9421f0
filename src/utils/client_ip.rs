//! Client address resolution and `/24` whitelist matching.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

/// Fallback when no address can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// First three dot-separated segments of a textual address.
///
/// ```
/// use panelgate::utils::client_ip::subnet_c;
///
/// assert_eq!(subnet_c("203.0.113.77"), "203.0.113");
/// assert_eq!(subnet_c(" 10.1.2.3 "), "10.1.2");
/// assert_eq!(subnet_c("unknown"), "unknown");
/// ```
pub fn subnet_c(ip: &str) -> String {
    ip.trim().split('.').take(3).collect::<Vec<_>>().join(".")
}

/// True when `client_ip` shares a `/24` with any whitelisted entry.
///
/// An empty whitelist allows nobody.
pub fn ip_allowed(client_ip: &str, whitelist: &[String]) -> bool {
    let client = subnet_c(client_ip);
    whitelist.iter().any(|entry| subnet_c(entry) == client)
}

/// Resolves the client address: `X-Forwarded-For` (first hop), then
/// `X-Real-IP`, then the socket peer.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or("").trim().to_string())
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// Extractor for the resolved client address. Never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientIp(resolve_client_ip(&parts.headers, peer)))
    }
}
