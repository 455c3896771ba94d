//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::{HashConfig, HashEngine};

use crate::domain::entity::authentication_session::DEFAULT_EXPIRES_IN;
use crate::domain::value_object::client_secret::SECRET_LENGTH;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of issued credentials (1 hour)
    pub token_ttl: Duration,
    /// Length of generated secrets
    pub secret_length: usize,
    /// Argon2id cost parameters
    pub hash: HashConfig,
    /// Upper bound on hash computations running at once
    pub max_concurrent_hashes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: DEFAULT_EXPIRES_IN,
            secret_length: SECRET_LENGTH,
            hash: HashConfig::default(),
            max_concurrent_hashes: 4,
        }
    }
}

impl AuthConfig {
    /// Create config for development (cheap hashing)
    pub fn development() -> Self {
        Self {
            hash: HashConfig::DEVELOPMENT,
            ..Default::default()
        }
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }

    /// Build the hash engine for these parameters
    pub fn hash_engine(&self) -> HashEngine {
        HashEngine::new(self.hash)
    }
}
