//! Stored Credential Entity
//!
//! What the persistence layer keeps for a client: the encoded hash of its
//! secret and when the credential stops being accepted.

use chrono::Utc;
use kernel::id::ClientId;
use platform::password::EncodedHash;

use crate::domain::entity::authentication_session::AuthenticationSession;

/// Stored credential entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub client_id: ClientId,
    pub encoded_hash: EncodedHash,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl StoredCredential {
    pub fn new(client_id: ClientId, encoded_hash: EncodedHash, expires_at_ms: i64) -> Self {
        Self {
            client_id,
            encoded_hash,
            expires_at_ms,
        }
    }

    /// Record for a freshly issued session
    pub fn for_session(session: &AuthenticationSession, encoded_hash: EncodedHash) -> Self {
        Self::new(session.client_id, encoded_hash, session.expires_at_ms)
    }

    /// Check if credential has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}
