//! Cryptographic Utilities
//!
//! Every random value produced here comes from the operating system CSPRNG
//! through [`OsRng`]. Failures are reported, never papered over with a weaker
//! generator.

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Upper and lower case ASCII letters
pub const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The operating system random source could not be read
#[derive(Debug, Error)]
#[error("Secure random source unavailable: {0}")]
pub struct RandomSourceError(#[from] rand::Error);

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Result<Vec<u8>, RandomSourceError> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Generate a random string of `len` characters drawn uniformly from `alphabet`
///
/// `alphabet` must be ASCII and hold at most 256 symbols. Bytes that would
/// bias the distribution are rejected and redrawn.
pub fn random_string(len: usize, alphabet: &[u8]) -> Result<String, RandomSourceError> {
    if len == 0 || alphabet.is_empty() {
        return Ok(String::new());
    }
    debug_assert!(alphabet.len() <= 256 && alphabet.is_ascii());

    let n = alphabet.len();
    // Largest multiple of n that fits in a byte
    let limit = 256 - (256 % n);

    let mut out = String::with_capacity(len);
    let mut buf = vec![0u8; len];
    while out.len() < len {
        OsRng.try_fill_bytes(&mut buf)?;
        for &b in &buf {
            if (b as usize) < limit {
                out.push(char::from(alphabet[b as usize % n]));
                if out.len() == len {
                    break;
                }
            }
        }
    }
    Ok(out)
}

/// Encode bytes as padded standard base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode padded standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as unpadded standard base64
pub fn to_base64_unpadded(bytes: &[u8]) -> String {
    general_purpose::STANDARD_NO_PAD.encode(bytes)
}

/// Decode unpadded standard base64 to bytes
pub fn from_base64_unpadded(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD_NO_PAD.decode(s)
}

/// Constant-time comparison to prevent timing attacks
///
/// Only the lengths may leak; the position of the first differing byte does not.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
