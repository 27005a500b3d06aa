//! Submission provenance taken from the HTTP request
//!
//! Client IPs come from `X-Forwarded-For` (honouring the number of trusted
//! proxies in front of the service), then `X-Real-IP`, then the socket. Every
//! candidate must parse as an IP address, so spoofed garbage never reaches
//! the stored record.

use axum::http::{header, HeaderMap};
use inquiry_core::models::Provenance;
use std::net::{IpAddr, SocketAddr};

/// Best-effort client IP; `None` when nothing usable is available
pub fn client_ip(
    headers: &HeaderMap,
    socket_addr: Option<&SocketAddr>,
    trusted_proxy_count: usize,
) -> Option<IpAddr> {
    header_text(headers, "x-forwarded-for")
        .and_then(|chain| from_forwarded_for(chain, trusted_proxy_count))
        .or_else(|| header_text(headers, "x-real-ip").and_then(parse_ip))
        .or_else(|| socket_addr.map(SocketAddr::ip))
}

/// IP plus the `User-Agent` and `Referer` headers
///
/// The header values are only fallbacks; fields the form sends in the body
/// win when the submission is built.
pub fn request_provenance(
    headers: &HeaderMap,
    socket_addr: Option<&SocketAddr>,
    trusted_proxy_count: usize,
) -> Provenance {
    Provenance {
        ip_address: client_ip(headers, socket_addr, trusted_proxy_count).map(|ip| ip.to_string()),
        user_agent: header_text(headers, header::USER_AGENT.as_str()).map(str::to_string),
        referrer: header_text(headers, header::REFERER.as_str()).map(str::to_string),
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Pick the client out of `client, proxy1, proxy2, ...`
///
/// With N trusted proxies the last N entries were appended by our own
/// infrastructure and the entry before them is the client. With no trusted
/// proxies, or a chain too short to contain them, only the entry closest to
/// us is considered.
fn from_forwarded_for(chain: &str, trusted_proxy_count: usize) -> Option<IpAddr> {
    let hops: Vec<&str> = chain
        .split(',')
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .collect();

    let position = if trusted_proxy_count == 0 || hops.len() <= trusted_proxy_count {
        hops.len().checked_sub(1)?
    } else {
        hops.len() - trusted_proxy_count - 1
    };

    hops.get(position).copied().and_then(parse_ip)
}

fn parse_ip(candidate: &str) -> Option<IpAddr> {
    candidate.parse().ok()
}
