//! Authentication Session Entity
//!
//! The outcome of issuing a credential: who it is for, the bearer token the
//! client presents, and how long it is valid. The plaintext secret is not
//! part of the session; it lives only inside the token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use kernel::id::ClientId;

use crate::domain::value_object::bearer_token::BearerToken;

/// Default credential lifetime (1 hour)
pub const DEFAULT_EXPIRES_IN: Duration = Duration::from_secs(3600);

/// Authentication session entity
#[derive(Debug, Clone)]
pub struct AuthenticationSession {
    pub client_id: ClientId,
    pub token: BearerToken,
    /// Validity window from issuance
    pub expires_in: Duration,
    pub issued_at: DateTime<Utc>,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl AuthenticationSession {
    /// Create a session issued now
    pub fn new(client_id: ClientId, token: BearerToken, expires_in: Duration) -> Self {
        let issued_at = Utc::now();
        let window = chrono::Duration::from_std(expires_in).unwrap_or(chrono::Duration::MAX);
        let expires_at_ms = issued_at
            .checked_add_signed(window)
            .map(|at| at.timestamp_millis())
            .unwrap_or(i64::MAX);

        Self {
            client_id,
            token,
            expires_in,
            issued_at,
            expires_at_ms,
        }
    }

    /// Validity window in whole seconds
    pub fn expires_in_secs(&self) -> u64 {
        self.expires_in.as_secs()
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}
