//! Bootstrap Credential
//!
//! One-shot provisioning of a known client at startup. The operator drops a
//! JSON file next to the binary:
//!
//! ```json
//! {"client": {"id": "<uuid>", "secret": "<secret>"}}
//! ```
//!
//! The credential is stored, its `Authorization` header is logged for the
//! operator, and the file is deleted so the secret does not linger on disk.

use std::fmt;
use std::path::Path;

use anyhow::{Context, bail};
use auth::application::IssueTokenOutput;
use auth::domain::repository::CredentialRepository;
use auth::domain::value_object::client_secret::ClientSecret;
use auth::presentation::AuthAppState;
use kernel::id::ClientId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct BootstrapFile {
    client: BootstrapClient,
}

#[derive(Deserialize)]
struct BootstrapClient {
    id: ClientId,
    secret: String,
}

impl fmt::Debug for BootstrapClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapClient")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Provision the bootstrap client if `path` exists
///
/// Returns `Ok(None)` when there is no file.
pub async fn run<R>(path: &Path, state: &AuthAppState<R>) -> anyhow::Result<Option<IssueTokenOutput>>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No bootstrap file, skipping");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let file: BootstrapFile = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    drop(raw);

    if file.client.secret.is_empty() {
        bail!("bootstrap client secret must not be empty");
    }

    let client_id = file.client.id;
    let output = state
        .issue_token_use_case()
        .execute_with_secret(client_id, ClientSecret::new(file.client.secret))
        .await
        .context("failed to issue bootstrap credential")?;

    tracing::info!(
        client_id = %output.client_id,
        header = %output.token.authorization_header(),
        "Bootstrap client provisioned"
    );

    tokio::fs::remove_file(path)
        .await
        .with_context(|| format!("failed to delete {}", path.display()))?;

    Ok(Some(output))
}
