use std::net::SocketAddr;

use axum::http::HeaderMap;
use rate_limit::ClientIdentity;

/// Derive the quota identity for a request.
///
/// The first comma-separated entry of `X-Forwarded-For` wins when present
/// and parseable; otherwise the direct peer address is used. The service is
/// expected to sit behind a proxy that sets the header, so the first entry
/// is the original client.
pub(crate) fn client_identity(headers: &HeaderMap, peer: SocketAddr) -> ClientIdentity {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|entry| entry.trim().parse().ok());

    match forwarded {
        Some(ip) => ClientIdentity::from_ip(ip),
        None => ClientIdentity::from_ip(peer.ip()),
    }
}
