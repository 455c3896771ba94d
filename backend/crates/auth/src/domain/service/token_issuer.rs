//! Token Issuer
//!
//! Builds bearer tokens for one client identity and derives the verifiable
//! digest that gets stored in place of the secret.
//!
//! ## Flow
//! 1. Secret: 32 ASCII letters from the OS CSPRNG (or supplied by the caller)
//! 2. Token: base64(`"<client id>:<secret>"`)
//! 3. Digest: Argon2id hash of the secret alone, in encoded form
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use auth::domain::service::token_issuer::TokenIssuer;
//! use platform::password::{HashConfig, HashEngine};
//!
//! let engine = Arc::new(HashEngine::new(HashConfig::DEVELOPMENT));
//! let issuer = TokenIssuer::for_new_client(engine.clone());
//!
//! let (token, encoded_hash) = issuer.generate_token().unwrap();
//! let (client_id, secret) = TokenIssuer::decode_token(token.as_str()).unwrap();
//!
//! assert_eq!(client_id, issuer.client_id());
//! assert!(engine.verify_password(encoded_hash.as_str(), secret.as_str()).unwrap());
//! ```

use std::sync::Arc;
use std::time::Duration;

use kernel::id::ClientId;
use platform::password::{EncodedHash, HashEngine};

use crate::domain::entity::authentication_session::{AuthenticationSession, DEFAULT_EXPIRES_IN};
use crate::domain::value_object::{
    bearer_token::BearerToken,
    client_secret::{ClientSecret, SECRET_LENGTH},
};
use crate::error::AuthResult;

/// Issues bearer tokens for a single client identity
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    client_id: ClientId,
    expires_in: Duration,
    secret_length: usize,
    engine: Arc<HashEngine>,
}

impl TokenIssuer {
    /// Bind an existing identity
    pub fn new(client_id: ClientId, engine: Arc<HashEngine>) -> Self {
        Self {
            client_id,
            expires_in: DEFAULT_EXPIRES_IN,
            secret_length: SECRET_LENGTH,
            engine,
        }
    }

    /// Bind a freshly generated v4 identity
    pub fn for_new_client(engine: Arc<HashEngine>) -> Self {
        Self::new(ClientId::new(), engine)
    }

    /// Override the validity window
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Override the generated secret length
    pub fn with_secret_length(mut self, secret_length: usize) -> Self {
        self.secret_length = secret_length;
        self
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Generate a new secret, then a token and its encoded hash
    ///
    /// ## Errors
    /// `AuthError::RandomSource` if the OS random source fails (secret or salt).
    pub fn generate_token(&self) -> AuthResult<(BearerToken, EncodedHash)> {
        let secret = ClientSecret::generate_with_length(self.secret_length)?;
        self.generate_token_with_secret(&secret)
    }

    /// Build a token and encoded hash for a caller-supplied secret
    pub fn generate_token_with_secret(
        &self,
        secret: &ClientSecret,
    ) -> AuthResult<(BearerToken, EncodedHash)> {
        tracing::debug!(client_id = %self.client_id, "Generating token");

        let token = BearerToken::encode(&self.client_id, secret);
        let (_digest, encoded_hash) = self.engine.hash_password(secret.as_str())?;

        Ok((token, encoded_hash))
    }

    /// Split a token string back into identity and secret
    pub fn decode_token(token: &str) -> AuthResult<(ClientId, ClientSecret)> {
        BearerToken::new(token).decode()
    }

    /// Issue a session with a newly generated secret
    ///
    /// The secret never leaves this call except inside the token.
    pub fn issue_session(&self) -> AuthResult<(AuthenticationSession, EncodedHash)> {
        let (token, encoded_hash) = self.generate_token()?;
        Ok((self.session_for(token), encoded_hash))
    }

    /// Issue a session for a caller-supplied secret
    pub fn issue_session_with_secret(
        &self,
        secret: &ClientSecret,
    ) -> AuthResult<(AuthenticationSession, EncodedHash)> {
        let (token, encoded_hash) = self.generate_token_with_secret(secret)?;
        Ok((self.session_for(token), encoded_hash))
    }

    fn session_for(&self, token: BearerToken) -> AuthenticationSession {
        AuthenticationSession::new(self.client_id, token, self.expires_in)
    }
}
