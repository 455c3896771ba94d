//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token issuer, entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router, trusted proxy middleware
//!
//! ## Features
//! - Bearer credentials of the form base64(`"<client id>:<secret>"`)
//! - Issuance gated by a literal-address trusted proxy list
//! - Verification against the stored Argon2id hash of the secret
//!
//! ## Security Model
//! - Secrets drawn from the OS CSPRNG; only their Argon2id hash is stored
//! - Hash computations run on the blocking pool, bounded by a semaphore
//! - Plaintext secrets are zeroized on drop and never logged

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryCredentialRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::{authentication_session::*, stored_credential::*};
    pub use crate::domain::value_object::{bearer_token::*, client_secret::*};
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryCredentialRepository as CredentialStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
