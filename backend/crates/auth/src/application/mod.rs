//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod hash_workers;
pub mod issue_token;
pub mod verify_token;

// Re-exports
pub use config::AuthConfig;
pub use hash_workers::HashWorkers;
pub use issue_token::{IssueTokenOutput, IssueTokenUseCase};
pub use verify_token::{VerifyTokenOutput, VerifyTokenUseCase};
