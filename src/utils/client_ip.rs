//! Visitor address extraction from HTTP request metadata.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Headers consulted, in order, when the service runs behind a trusted proxy.
const PROXY_HEADERS: &[&str] = &["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Resolves the client address recorded for a visit.
///
/// When `behind_proxy` is set, the first parseable address from
/// `CF-Connecting-IP`, `X-Forwarded-For` (left-most entry) or `X-Real-IP`
/// wins. Otherwise, and as a fallback, the socket peer address is used.
///
/// Returns an empty string when no address is known.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_ip(&headers, None, true), "203.0.113.7");
/// ```
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, behind_proxy: bool) -> String {
    if behind_proxy {
        for name in PROXY_HEADERS {
            let candidate = headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .and_then(|v| v.trim().parse::<IpAddr>().ok());

            if let Some(ip) = candidate {
                return ip.to_string();
            }
        }
    }

    peer.map(|ip| ip.to_string()).unwrap_or_default()
}
