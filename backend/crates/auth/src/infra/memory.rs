//! In-Memory Repository Implementation
//!
//! Process-local credential store. Credentials do not survive a restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::ClientId;
use tokio::sync::RwLock;

use crate::domain::entity::stored_credential::StoredCredential;
use crate::domain::repository::CredentialRepository;
use crate::error::AuthResult;

/// In-memory credential repository
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<ClientId, StoredCredential>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials (expired ones included)
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

impl CredentialRepository for InMemoryCredentialRepository {
    async fn store(&self, credential: &StoredCredential) -> AuthResult<()> {
        self.credentials
            .write()
            .await
            .insert(credential.client_id, credential.clone());
        Ok(())
    }

    async fn find_by_client_id(
        &self,
        client_id: &ClientId,
    ) -> AuthResult<Option<StoredCredential>> {
        Ok(self.credentials.read().await.get(client_id).cloned())
    }

    async fn delete(&self, client_id: &ClientId) -> AuthResult<()> {
        self.credentials.write().await.remove(client_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let mut credentials = self.credentials.write().await;
        let before = credentials.len();
        credentials.retain(|_, credential| credential.expires_at_ms >= now_ms);
        let deleted = (before - credentials.len()) as u64;

        tracing::info!(credentials_deleted = deleted, "Cleaned up expired credentials");

        Ok(deleted)
    }
}
