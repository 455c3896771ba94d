//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use platform::password::HashEngine;

use crate::application::config::AuthConfig;
use crate::application::{HashWorkers, IssueTokenUseCase, VerifyTokenUseCase};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::bearer_token::BearerToken;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{TokenResponse, VerifyResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub engine: Arc<HashEngine>,
    pub workers: HashWorkers,
}

impl<R> AuthAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            engine: Arc::new(config.hash_engine()),
            workers: HashWorkers::new(config.max_concurrent_hashes),
            repo,
            config,
        }
    }

    pub fn issue_token_use_case(&self) -> IssueTokenUseCase<R> {
        IssueTokenUseCase::new(
            self.repo.clone(),
            self.engine.clone(),
            self.workers.clone(),
            self.config.clone(),
        )
    }

    pub fn verify_token_use_case(&self) -> VerifyTokenUseCase<R> {
        VerifyTokenUseCase::new(self.repo.clone(), self.engine.clone(), self.workers.clone())
    }
}

// ============================================================================
// Token Generation
// ============================================================================

/// GET|POST /token/generate
pub async fn generate_token<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<TokenResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let output = state.issue_token_use_case().execute().await?;

    Ok(Json(output.into()))
}

/// Any other method on a known route
pub async fn method_not_allowed() -> AuthError {
    AuthError::MethodNotAllowed
}

// ============================================================================
// Token Verification
// ============================================================================

/// POST /token/verify
pub async fn verify_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<VerifyResponse>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AuthError::MissingHeader(header::AUTHORIZATION.to_string()))?;

    let token = BearerToken::from_authorization_header(value)?;
    let output = state.verify_token_use_case().execute(&token).await?;

    Ok(Json(output.into()))
}
