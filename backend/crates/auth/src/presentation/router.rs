//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use platform::proxy::TrustedProxies;

use crate::domain::repository::CredentialRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_trusted_proxy;

/// Create the token router
///
/// `/token/generate` sits behind the trusted proxy gate, including its
/// 405 fallback. `/token/verify` is open: the token is the credential.
pub fn auth_router<R>(state: AuthAppState<R>, proxies: TrustedProxies) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let gate = middleware::from_fn_with_state(Arc::new(proxies), require_trusted_proxy);

    Router::new()
        .route(
            "/token/generate",
            get(handlers::generate_token::<R>)
                .post(handlers::generate_token::<R>)
                .fallback(handlers::method_not_allowed)
                .layer(gate),
        )
        .route(
            "/token/verify",
            post(handlers::verify_token::<R>).fallback(handlers::method_not_allowed),
        )
        .with_state(state)
}
