//! Trusted Proxy Middleware
//!
//! Rejects requests whose transport-level peer address is not on the
//! trusted proxy list. Forwarding headers are ignored.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::extract_client_address;
use platform::proxy::TrustedProxies;

use crate::error::AuthError;

/// Middleware that only lets trusted callers through
///
/// Without `ConnectInfo` the remote address is the empty string, which only
/// an empty (disabled) list accepts.
pub async fn require_trusted_proxy(
    State(proxies): State<Arc<TrustedProxies>>,
    req: Request,
    next: Next,
) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_default();

    tracing::debug!(trusted_proxies = ?proxies.entries(), "Checking caller against trusted proxies");

    if !proxies.is_trusted_remote(&remote_addr) {
        tracing::warn!(remote_addr = %remote_addr, "Unauthorized access");
        return AuthError::UntrustedProxy.into_response();
    }

    tracing::debug!(client_ip = %extract_client_address(&remote_addr), "Trusted caller");

    next.run(req).await
}
