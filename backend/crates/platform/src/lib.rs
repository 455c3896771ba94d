//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS random source, Base64, constant-time equality)
//! - Secret hashing (Argon2id with a self-describing encoded form)
//! - Caller address extraction
//! - Trusted proxy allow-list

pub mod client;
pub mod crypto;
pub mod password;
pub mod proxy;
