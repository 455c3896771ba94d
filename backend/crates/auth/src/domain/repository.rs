//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::ClientId;

use crate::domain::entity::stored_credential::StoredCredential;
use crate::error::AuthResult;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Insert or replace the credential for its client
    async fn store(&self, credential: &StoredCredential) -> AuthResult<()>;

    /// Find credential by client ID
    async fn find_by_client_id(&self, client_id: &ClientId)
    -> AuthResult<Option<StoredCredential>>;

    /// Delete credential (no-op if absent)
    async fn delete(&self, client_id: &ClientId) -> AuthResult<()>;

    /// Remove expired credentials, returning how many were removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
