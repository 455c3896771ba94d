//! Secret Hashing and Verification
//!
//! Argon2id hashing with explicit cost parameters and a self-describing
//! encoded form:
//!
//! ```text
//! $argon2id$v=19$m=<memory KiB>,t=<iterations>,p=<parallelism>$<salt>$<digest>
//! ```
//!
//! Salt and digest are standard base64 without padding. Everything needed to
//! verify a secret later is embedded in that string.
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Fresh OS-random salt per hash
//! - Constant-time digest comparison
//! - Digests are zeroized when dropped

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::crypto::{
    RandomSourceError, constant_time_eq, from_base64_unpadded, random_bytes, to_base64_unpadded,
};

// ============================================================================
// Constants
// ============================================================================

/// Algorithm tag of the encoded form
pub const ALGORITHM_TAG: &str = "argon2id";

/// Argon2 version implemented by this engine (0x13)
pub const ARGON2_VERSION: u32 = 0x13;

/// Minimum salt length accepted by Argon2
pub const MIN_SALT_LENGTH: u32 = 8;

/// Minimum digest length accepted by Argon2
pub const MIN_KEY_LENGTH: u32 = 4;

const ENCODED_FIELD_COUNT: usize = 6;

// ============================================================================
// Error Types
// ============================================================================

/// Hashing/verification errors
#[derive(Debug, Error)]
pub enum HashError {
    /// OS random source failed while drawing a salt
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),

    /// Cost parameters rejected at construction
    #[error("Invalid hash configuration: {0}")]
    InvalidConfig(String),

    /// Encoded hash cannot be parsed
    #[error("Malformed encoded hash: {0}")]
    MalformedHash(String),

    /// Encoded hash was produced by another Argon2 version
    #[error("Incompatible argon2 version: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    /// Argon2 refused the input while hashing
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Hash Configuration
// ============================================================================

/// Argon2id cost parameters
///
/// Immutable once constructed. `memory_kib >= 8 * parallelism` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
    salt_length: u32,
    key_length: u32,
}

impl HashConfig {
    /// 64 MiB
    pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
    pub const DEFAULT_ITERATIONS: u32 = 4;
    pub const DEFAULT_PARALLELISM: u32 = 4;
    pub const DEFAULT_SALT_LENGTH: u32 = 16;
    pub const DEFAULT_KEY_LENGTH: u32 = 32;

    /// Cheap parameters for local development and tests (1 MiB, t=1, p=1)
    pub const DEVELOPMENT: HashConfig = HashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
        salt_length: 16,
        key_length: 32,
    };

    /// Create a validated configuration
    ///
    /// ## Errors
    /// `HashError::InvalidConfig` if any value is zero, parallelism exceeds
    /// `Params::MAX_P_COST`, memory is below `8 * parallelism`, or salt/key
    /// lengths are under the Argon2 minimums.
    pub fn new(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
        salt_length: u32,
        key_length: u32,
    ) -> Result<Self, HashError> {
        if salt_length < MIN_SALT_LENGTH {
            return Err(HashError::InvalidConfig(format!(
                "salt length must be at least {} bytes (got {})",
                MIN_SALT_LENGTH, salt_length
            )));
        }
        if key_length < MIN_KEY_LENGTH {
            return Err(HashError::InvalidConfig(format!(
                "key length must be at least {} bytes (got {})",
                MIN_KEY_LENGTH, key_length
            )));
        }
        if parallelism == 0 || parallelism > Params::MAX_P_COST {
            return Err(HashError::InvalidConfig(format!(
                "parallelism must be between 1 and {} (got {})",
                Params::MAX_P_COST,
                parallelism
            )));
        }
        if u64::from(memory_kib) < u64::from(parallelism) * 8 {
            return Err(HashError::InvalidConfig(format!(
                "memory ({} KiB) must be at least 8 x parallelism ({})",
                memory_kib, parallelism
            )));
        }

        let config = Self {
            memory_kib,
            iterations,
            parallelism,
            salt_length,
            key_length,
        };

        // Let Argon2 apply the remaining bounds (iterations, upper limits)
        config
            .argon2_params()
            .map_err(|e| HashError::InvalidConfig(e.to_string()))?;

        Ok(config)
    }

    pub fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn salt_length(&self) -> u32 {
        self.salt_length
    }

    pub fn key_length(&self) -> u32 {
        self.key_length
    }

    fn argon2_params(&self) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(self.key_length as usize),
        )
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            memory_kib: Self::DEFAULT_MEMORY_KIB,
            iterations: Self::DEFAULT_ITERATIONS,
            parallelism: Self::DEFAULT_PARALLELISM,
            salt_length: Self::DEFAULT_SALT_LENGTH,
            key_length: Self::DEFAULT_KEY_LENGTH,
        }
    }
}

// ============================================================================
// Encoded Hash
// ============================================================================

/// Encoded hash string, safe to store
///
/// ## Examples
/// ```rust
/// use platform::password::{HashConfig, HashEngine};
///
/// let engine = HashEngine::new(HashConfig::new(1024, 1, 1, 16, 32).unwrap());
/// let (_digest, encoded) = engine.hash_password("s3cret").unwrap();
///
/// assert!(engine.verify_password(encoded.as_str(), "s3cret").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedHash(String);

impl EncodedHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Split into parameters, salt and digest
    pub fn parse(&self) -> Result<ParsedHash, HashError> {
        ParsedHash::parse(&self.0)
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodedHash").field(&"[HASH]").finish()
    }
}

/// Components of an encoded hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHash {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub digest: Vec<u8>,
}

impl ParsedHash {
    /// Parse the six `$`-delimited fields
    ///
    /// ## Errors
    /// - `MalformedHash` for a wrong field count, unknown algorithm tag,
    ///   unparsable or out-of-range numbers, or invalid base64
    /// - `VersionMismatch` when the version is not [`ARGON2_VERSION`]
    pub fn parse(encoded: &str) -> Result<Self, HashError> {
        let fields: Vec<&str> = encoded.split('$').collect();
        if fields.len() != ENCODED_FIELD_COUNT {
            return Err(malformed(format!(
                "expected {} `$`-delimited fields, found {}",
                ENCODED_FIELD_COUNT,
                fields.len()
            )));
        }

        if !fields[0].is_empty() || fields[1] != ALGORITHM_TAG {
            return Err(malformed("unsupported algorithm tag"));
        }

        let version = fields[2]
            .strip_prefix("v=")
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| malformed("invalid version field"))?;
        if version != ARGON2_VERSION {
            return Err(HashError::VersionMismatch {
                found: version,
                expected: ARGON2_VERSION,
            });
        }

        let mut params = fields[3].split(',');
        let memory_kib = parse_param(params.next(), "m")?;
        let iterations = parse_param(params.next(), "t")?;
        let parallelism = parse_param(params.next(), "p")?;
        if params.next().is_some() {
            return Err(malformed("unexpected trailing parameter"));
        }
        if iterations == 0 {
            return Err(malformed("`t` parameter must be positive"));
        }
        // Argon2 multiplies parallelism before range-checking it
        if parallelism == 0 || parallelism > Params::MAX_P_COST {
            return Err(malformed(format!(
                "`p` parameter out of range (1..={})",
                Params::MAX_P_COST
            )));
        }

        let salt = from_base64_unpadded(fields[4]).map_err(|_| malformed("invalid salt encoding"))?;
        let digest =
            from_base64_unpadded(fields[5]).map_err(|_| malformed("invalid digest encoding"))?;
        if digest.is_empty() {
            return Err(malformed("empty digest"));
        }

        Ok(Self {
            memory_kib,
            iterations,
            parallelism,
            salt,
            digest,
        })
    }

    /// Rebuild the encoded form
    pub fn encode(&self) -> EncodedHash {
        EncodedHash(format!(
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_TAG,
            ARGON2_VERSION,
            self.memory_kib,
            self.iterations,
            self.parallelism,
            to_base64_unpadded(&self.salt),
            to_base64_unpadded(&self.digest),
        ))
    }
}

// ============================================================================
// Hash Engine
// ============================================================================

/// Argon2id hasher bound to one [`HashConfig`]
///
/// Holds no mutable state; share it freely behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct HashEngine {
    config: HashConfig,
}

impl HashEngine {
    pub fn new(config: HashConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Hash a secret with a fresh random salt
    ///
    /// ## Returns
    /// The raw digest and its encoded form
    ///
    /// ## Errors
    /// `HashError::RandomSource` if the OS random source is unavailable
    pub fn hash_password(
        &self,
        plaintext: &str,
    ) -> Result<(Zeroizing<Vec<u8>>, EncodedHash), HashError> {
        let salt = random_bytes(self.config.salt_length as usize)?;
        self.hash_with_salt(plaintext, &salt)
    }

    /// Hash a secret with a caller-provided salt
    ///
    /// The digest is a pure function of (plaintext, salt, config).
    pub fn hash_with_salt(
        &self,
        plaintext: &str,
        salt: &[u8],
    ) -> Result<(Zeroizing<Vec<u8>>, EncodedHash), HashError> {
        let digest = derive(
            plaintext.as_bytes(),
            salt,
            self.config.memory_kib,
            self.config.iterations,
            self.config.parallelism,
            self.config.key_length as usize,
        )
        .map_err(|e| HashError::HashingFailed(e.to_string()))?;

        let encoded = ParsedHash {
            memory_kib: self.config.memory_kib,
            iterations: self.config.iterations,
            parallelism: self.config.parallelism,
            salt: salt.to_vec(),
            digest: digest.to_vec(),
        }
        .encode();

        Ok((digest, encoded))
    }

    /// Verify a secret against an encoded hash
    ///
    /// Parameters, salt and digest length come from `encoded`, not from this
    /// engine's config, so hashes made under older settings still verify.
    ///
    /// ## Returns
    /// - `Ok(true)` / `Ok(false)` for match / mismatch
    /// - `Err(MalformedHash | VersionMismatch)` for input this engine cannot read
    pub fn verify_password(&self, encoded: &str, plaintext: &str) -> Result<bool, HashError> {
        let parsed = ParsedHash::parse(encoded)?;

        let candidate = derive(
            plaintext.as_bytes(),
            &parsed.salt,
            parsed.memory_kib,
            parsed.iterations,
            parsed.parallelism,
            parsed.digest.len(),
        )
        .map_err(|e| malformed(format!("embedded parameters rejected: {}", e)))?;

        Ok(constant_time_eq(&candidate, &parsed.digest))
    }

    /// Encoded hash carrying this engine's parameters and an all-zero digest
    ///
    /// Verifying against it costs the same as a real verification and
    /// matches no secret in practice. Used when there is no stored hash to
    /// check, so the response time does not reveal that.
    pub fn decoy_hash(&self) -> EncodedHash {
        ParsedHash {
            memory_kib: self.config.memory_kib,
            iterations: self.config.iterations,
            parallelism: self.config.parallelism,
            salt: vec![0u8; self.config.salt_length as usize],
            digest: vec![0u8; self.config.key_length as usize],
        }
        .encode()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn derive(
    plaintext: &[u8],
    salt: &[u8],
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
    key_length: usize,
) -> Result<Zeroizing<Vec<u8>>, argon2::Error> {
    let params = Params::new(memory_kib, iterations, parallelism, Some(key_length))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = Zeroizing::new(vec![0u8; key_length]);
    argon2.hash_password_into(plaintext, salt, &mut out)?;
    Ok(out)
}

fn parse_param(field: Option<&str>, name: &str) -> Result<u32, HashError> {
    field
        .and_then(|f| f.strip_prefix(name))
        .and_then(|f| f.strip_prefix('='))
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| malformed(format!("invalid `{}` parameter", name)))
}

fn malformed(reason: impl Into<String>) -> HashError {
    HashError::MalformedHash(reason.into())
}

// ============================================================================
// Tests
// ============================================================================
