//! Verify Token Use Case
//!
//! Checks a presented bearer token against the stored credential.

use std::sync::Arc;

use kernel::id::ClientId;
use platform::password::HashEngine;

use crate::application::hash_workers::HashWorkers;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::bearer_token::BearerToken;
use crate::error::{AuthError, AuthResult};

/// Verified credential info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTokenOutput {
    pub client_id: ClientId,
    pub expires_at_ms: i64,
}

/// Verify token use case
pub struct VerifyTokenUseCase<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    engine: Arc<HashEngine>,
    workers: HashWorkers,
}

impl<R> VerifyTokenUseCase<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, engine: Arc<HashEngine>, workers: HashWorkers) -> Self {
        Self {
            repo,
            engine,
            workers,
        }
    }

    /// Verify token and return the authenticated identity
    ///
    /// An unknown identity still pays for one Argon2 verification, and an
    /// expired credential is removed from the repository.
    ///
    /// ## Errors
    /// - `Decode` / `InvalidIdentity` for unreadable tokens
    /// - `InvalidCredentials` for unknown identities or wrong secrets
    /// - `CredentialExpired` once the stored credential has lapsed
    /// - `MalformedHash` / `VersionMismatch` if the stored hash is unreadable
    pub async fn execute(&self, token: &BearerToken) -> AuthResult<VerifyTokenOutput> {
        let (client_id, secret) = token.decode()?;

        let Some(credential) = self.repo.find_by_client_id(&client_id).await? else {
            let engine = self.engine.clone();
            let decoy = engine.decoy_hash();
            self.workers
                .run(move || Ok(engine.verify_password(decoy.as_str(), secret.as_str())?))
                .await?;
            return Err(AuthError::InvalidCredentials);
        };

        if credential.is_expired() {
            self.repo.delete(&client_id).await?;
            tracing::debug!(client_id = %client_id, "Expired credential removed");
            return Err(AuthError::CredentialExpired);
        }

        let engine = self.engine.clone();
        let encoded_hash = credential.encoded_hash.clone();
        let matches = self
            .workers
            .run(move || Ok(engine.verify_password(encoded_hash.as_str(), secret.as_str())?))
            .await?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(client_id = %client_id, "Credential verified");

        Ok(VerifyTokenOutput {
            client_id,
            expires_at_ms: credential.expires_at_ms,
        })
    }
}
