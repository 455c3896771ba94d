//! Client Secret Value Object
//!
//! The plaintext half of a bearer token. Exists only while a token is being
//! built or verified; never persisted, never logged.

use std::fmt;

use platform::crypto::{ASCII_LETTERS, RandomSourceError, random_string};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of generated secrets
pub const SECRET_LENGTH: usize = 32;

/// Plaintext client secret
///
/// Memory is zeroized on drop and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wrap a caller-supplied secret
    ///
    /// Any string is accepted, including the empty one.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Generate a fresh [`SECRET_LENGTH`]-character secret from `[A-Za-z]`
    pub fn generate() -> Result<Self, RandomSourceError> {
        Self::generate_with_length(SECRET_LENGTH)
    }

    /// Generate a secret of `len` ASCII letters
    pub fn generate_with_length(len: usize) -> Result<Self, RandomSourceError> {
        random_string(len, ASCII_LETTERS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientSecret").field(&"[REDACTED]").finish()
    }
}
