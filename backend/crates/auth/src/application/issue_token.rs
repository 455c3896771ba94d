//! Issue Token Use Case
//!
//! Issues a bearer credential and stores its encoded hash.

use std::sync::Arc;

use kernel::id::ClientId;
use platform::password::{EncodedHash, HashEngine};

use crate::application::config::AuthConfig;
use crate::application::hash_workers::HashWorkers;
use crate::domain::entity::{
    authentication_session::AuthenticationSession, stored_credential::StoredCredential,
};
use crate::domain::repository::CredentialRepository;
use crate::domain::service::token_issuer::TokenIssuer;
use crate::domain::value_object::{bearer_token::BearerToken, client_secret::ClientSecret};
use crate::error::AuthResult;

/// Issue token output
#[derive(Debug)]
pub struct IssueTokenOutput {
    pub client_id: ClientId,
    pub token: BearerToken,
    pub expires_in_secs: u64,
    pub expires_at_ms: i64,
}

/// Issue token use case
pub struct IssueTokenUseCase<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    engine: Arc<HashEngine>,
    workers: HashWorkers,
    config: Arc<AuthConfig>,
}

impl<R> IssueTokenUseCase<R>
where
    R: CredentialRepository + Send + Sync + 'static,
{
    pub fn new(
        repo: Arc<R>,
        engine: Arc<HashEngine>,
        workers: HashWorkers,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            engine,
            workers,
            config,
        }
    }

    /// Issue a credential for a new client identity with a generated secret
    pub async fn execute(&self) -> AuthResult<IssueTokenOutput> {
        let issuer = self.issuer(ClientId::new());
        let (session, encoded_hash) = self.workers.run(move || issuer.issue_session()).await?;

        self.persist(session, encoded_hash).await
    }

    /// Issue a credential for a known identity and secret
    pub async fn execute_with_secret(
        &self,
        client_id: ClientId,
        secret: ClientSecret,
    ) -> AuthResult<IssueTokenOutput> {
        let issuer = self.issuer(client_id);
        let (session, encoded_hash) = self
            .workers
            .run(move || issuer.issue_session_with_secret(&secret))
            .await?;

        self.persist(session, encoded_hash).await
    }

    fn issuer(&self, client_id: ClientId) -> TokenIssuer {
        TokenIssuer::new(client_id, self.engine.clone())
            .with_expires_in(self.config.token_ttl)
            .with_secret_length(self.config.secret_length)
    }

    async fn persist(
        &self,
        session: AuthenticationSession,
        encoded_hash: EncodedHash,
    ) -> AuthResult<IssueTokenOutput> {
        let credential = StoredCredential::for_session(&session, encoded_hash);
        self.repo.store(&credential).await?;

        tracing::info!(
            client_id = %credential.client_id,
            expires_at_ms = credential.expires_at_ms,
            "Credential issued"
        );
        tracing::debug!(encoded_hash = %credential.encoded_hash, "Stored credential hash");

        Ok(IssueTokenOutput {
            client_id: credential.client_id,
            expires_in_secs: session.expires_in_secs(),
            token: session.token,
            expires_at_ms: credential.expires_at_ms,
        })
    }
}
