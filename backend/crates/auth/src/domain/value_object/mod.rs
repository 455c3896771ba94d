//! Value Object Module

pub mod bearer_token;
pub mod client_secret;
