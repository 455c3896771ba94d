//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Client-facing messages never echo hash contents or decode details; those
//! only go to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::RandomSourceError;
use platform::password::HashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// OS random source unavailable (fatal to the call)
    #[error(transparent)]
    RandomSource(#[from] RandomSourceError),

    /// Bearer token is not base64, not UTF-8 or has no `:` separator
    #[error("Invalid token encoding: {0}")]
    Decode(String),

    /// Identity segment of the token is not a UUID
    #[error("Invalid client identity: {0}")]
    InvalidIdentity(#[source] uuid::Error),

    /// Stored hash cannot be parsed
    #[error("Malformed credential hash: {0}")]
    MalformedHash(String),

    /// Stored hash was written by another Argon2 version
    #[error("Incompatible credential hash version: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    /// Unknown identity or wrong secret
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credential exists but its lifetime is over
    #[error("Credential expired")]
    CredentialExpired,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Caller address is not on the trusted proxy list
    #[error("Unauthorized access")]
    UntrustedProxy,

    /// Route exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Decode(_)
            | AuthError::InvalidIdentity(_)
            | AuthError::MalformedHash(_)
            | AuthError::VersionMismatch { .. }
            | AuthError::InvalidCredentials
            | AuthError::CredentialExpired
            | AuthError::MissingHeader(_)
            | AuthError::UntrustedProxy => StatusCode::UNAUTHORIZED,
            AuthError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AuthError::RandomSource(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Decode(_)
            | AuthError::InvalidIdentity(_)
            | AuthError::MalformedHash(_)
            | AuthError::VersionMismatch { .. }
            | AuthError::InvalidCredentials
            | AuthError::CredentialExpired
            | AuthError::MissingHeader(_)
            | AuthError::UntrustedProxy => ErrorKind::Unauthorized,
            AuthError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            AuthError::RandomSource(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Text placed in the `error` field of the response body
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Decode(_) | AuthError::InvalidIdentity(_) => "Invalid token".to_string(),
            // Storage problems look like any other failed verification
            AuthError::MalformedHash(_)
            | AuthError::VersionMismatch { .. }
            | AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::RandomSource(_) | AuthError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::RandomSource(e) => {
                tracing::error!(error = %e, "Secure random source failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::MalformedHash(_) | AuthError::VersionMismatch { .. } => {
                tracing::error!(error = %self, "Stored credential unreadable (storage or version skew)");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid credential presented");
            }
            AuthError::UntrustedProxy => {
                tracing::warn!("Request from untrusted address rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        match err {
            HashError::RandomSource(e) => AuthError::RandomSource(e),
            HashError::MalformedHash(msg) => AuthError::MalformedHash(msg),
            HashError::VersionMismatch { found, expected } => {
                AuthError::VersionMismatch { found, expected }
            }
            HashError::InvalidConfig(msg) | HashError::HashingFailed(msg) => {
                AuthError::Internal(msg)
            }
        }
    }
}
