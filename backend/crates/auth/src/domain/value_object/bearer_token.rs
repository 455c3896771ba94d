//! Bearer Token Value Object
//!
//! Wire form: standard padded base64 of `"<client id>:<secret>"`, presented
//! as `Authorization: Bearer <token>`.

use std::fmt;

use kernel::id::ClientId;
use platform::crypto::{from_base64, to_base64};
use zeroize::Zeroizing;

use crate::domain::value_object::client_secret::ClientSecret;
use crate::error::{AuthError, AuthResult};

/// Authorization scheme prefix (case-sensitive)
pub const BEARER_PREFIX: &str = "Bearer ";

/// Compound bearer token
///
/// Carries the secret in recoverable form, so `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Pack an identity and secret into a token
    pub fn encode(client_id: &ClientId, secret: &ClientSecret) -> Self {
        let plain = Zeroizing::new(format!("{}:{}", client_id, secret.as_str()));
        Self(to_base64(plain.as_bytes()))
    }

    /// Wrap a token string as received
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Parse `Bearer <token>` from an Authorization header value
    pub fn from_authorization_header(value: &str) -> AuthResult<Self> {
        let token = value
            .trim()
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::Decode("expected Bearer authorization scheme".into()))?;

        Ok(Self(token.to_string()))
    }

    /// Unpack into identity and secret
    ///
    /// Splits on the first `:` only; the secret may itself contain colons.
    ///
    /// ## Errors
    /// - `AuthError::Decode` for bad base64, non-UTF-8 or a missing separator
    /// - `AuthError::InvalidIdentity` if the leading segment is not a UUID
    pub fn decode(&self) -> AuthResult<(ClientId, ClientSecret)> {
        let bytes = Zeroizing::new(
            from_base64(&self.0).map_err(|e| AuthError::Decode(e.to_string()))?,
        );
        let plain = std::str::from_utf8(&bytes)
            .map_err(|_| AuthError::Decode("token is not valid UTF-8".into()))?;

        let (id, secret) = plain
            .split_once(':')
            .ok_or_else(|| AuthError::Decode("missing identity separator".into()))?;

        let client_id = id.parse::<ClientId>().map_err(AuthError::InvalidIdentity)?;

        Ok((client_id, ClientSecret::new(secret)))
    }

    /// `Bearer <token>`
    pub fn authorization_header(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
