//! Domain Layer
//!
//! Contains entities, value objects, the token issuer and repository traits.

pub mod entity;
pub mod repository;
pub mod service;
pub mod value_object;

// Re-exports
pub use entity::{
    authentication_session::AuthenticationSession, stored_credential::StoredCredential,
};
pub use repository::CredentialRepository;
pub use service::token_issuer::TokenIssuer;
pub use value_object::{bearer_token::BearerToken, client_secret::ClientSecret};
