//! Client identification utilities
//!
//! Turns a transport-level remote address into the bare address text that
//! the trusted proxy list is matched against.

/// Strip the port from a remote address string
///
/// Accepted forms:
/// - `host:port` → `host` (text before the first `:`)
/// - `[host]:port` → `host` (bracketed IPv6 literal)
///
/// Anything else, including a `[` without a closing `]`, is returned unchanged.
///
/// ## Examples
/// ```rust
/// use platform::client::extract_client_address;
///
/// assert_eq!(extract_client_address("203.0.113.5:54321"), "203.0.113.5");
/// assert_eq!(extract_client_address("[::1]:54321"), "::1");
/// ```
pub fn extract_client_address(remote_addr: &str) -> &str {
    if remote_addr.contains('[') || remote_addr.contains(']') {
        return remote_addr
            .split_once('[')
            .and_then(|(_, rest)| rest.split_once(']'))
            .map(|(host, _)| host)
            .unwrap_or(remote_addr);
    }

    match remote_addr.split_once(':') {
        Some((host, _)) => host,
        None => remote_addr,
    }
}
