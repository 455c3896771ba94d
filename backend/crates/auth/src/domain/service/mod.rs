//! Domain Services

pub mod token_issuer;
