//! Entity Module

pub mod authentication_session;
pub mod stored_credential;
