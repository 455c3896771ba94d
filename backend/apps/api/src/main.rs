//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors use `kernel::error::AppError`.

mod bootstrap;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::domain::repository::CredentialRepository;
use auth::presentation::AuthAppState;
use auth::{InMemoryCredentialRepository, auth_router};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// How often expired credentials are swept from the store
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    if config.trusted_proxies.is_empty() {
        tracing::warn!("Trusted proxy list is empty, token generation is open to every caller");
    } else {
        tracing::info!(trusted_proxies = ?config.trusted_proxies.entries(), "Trusted proxies loaded");
    }

    let repo = InMemoryCredentialRepository::new();
    let state = AuthAppState::new(Arc::new(repo.clone()), Arc::new(config.auth.clone()));

    bootstrap::run(&config.bootstrap_file, &state).await?;

    // Periodic cleanup: errors here should not stop the server
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = repo.cleanup_expired().await {
                tracing::warn!(error = %e, "Credential cleanup failed, continuing anyway");
            }
        }
    });

    // Build router
    let app = Router::new()
        .merge(auth_router(state, config.trusted_proxies.clone()))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
