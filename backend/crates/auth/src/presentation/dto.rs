//! API DTOs (Data Transfer Objects)

use kernel::id::ClientId;
use serde::{Deserialize, Serialize};

use crate::application::{IssueTokenOutput, VerifyTokenOutput};

// ============================================================================
// Token Generation
// ============================================================================

/// Token generation response
///
/// `expires_in` is a decimal string, not a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: String,
    /// Ready-to-use `Authorization` header value
    pub header: String,
}

impl From<IssueTokenOutput> for TokenResponse {
    fn from(output: IssueTokenOutput) -> Self {
        Self {
            header: output.token.authorization_header(),
            expires_in: output.expires_in_secs.to_string(),
            token: output.token.into_string(),
        }
    }
}

// ============================================================================
// Token Verification
// ============================================================================

/// Token verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub id: ClientId,
    pub expires_at_ms: i64,
}

impl From<VerifyTokenOutput> for VerifyResponse {
    fn from(output: VerifyTokenOutput) -> Self {
        Self {
            id: output.client_id,
            expires_at_ms: output.expires_at_ms,
        }
    }
}
