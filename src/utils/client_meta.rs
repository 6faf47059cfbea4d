//! Client metadata extraction from request headers.
//!
//! The service is expected to run behind a CDN or reverse proxy, so the
//! forwarding headers are taken at face value. No trust chain is validated.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Geolocation headers set by common CDNs/proxies, in precedence order.
const COUNTRY_HEADERS: [&str; 3] = ["cf-ipcountry", "x-geo-country", "x-country"];

/// Returns a header's value, trimmed, or `None` when absent, non-ASCII or blank.
pub fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Best-effort client address.
///
/// Priority:
/// 1. First entry of `X-Forwarded-For`
/// 2. `X-Real-Ip`
/// 3. The peer socket address
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    let forwarded = header_value(headers, "x-forwarded-for").and_then(|list| {
        list.split(',')
            .next()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
    });

    forwarded
        .or_else(|| header_value(headers, "x-real-ip"))
        .unwrap_or_else(|| peer.ip().to_string())
}

/// Country code from the first non-blank geolocation header.
pub fn country_from_headers(headers: &HeaderMap) -> Option<String> {
    COUNTRY_HEADERS
        .iter()
        .find_map(|name| header_value(headers, name))
}
