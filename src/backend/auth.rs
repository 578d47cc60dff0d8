#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable the CLI reads the service account JSON blob from.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS_JSON";

/// Environment variable the CLI reads the bearer token from. Minting tokens
/// from the key material is left to external tooling (gcloud and friends).
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials are not set")]
    Missing,

    #[error("parsing credentials: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to get project ID from credentials")]
    MissingProjectId,
}

/// Parsed form of a Google service account key. Only the fields the adapter
/// cares about are kept, the rest of the blob is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default, rename = "type")]
    pub key_type: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub client_email: Option<String>,

    #[serde(default)]
    pub private_key_id: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, CredentialsError> {
        if raw.trim().is_empty() {
            return Err(CredentialsError::Missing);
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Project identity the generate calls run against. A key without a
    /// usable project ID cannot ever call out, so this is checked up front.
    pub fn project_id(&self) -> Result<&str, CredentialsError> {
        self.project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(CredentialsError::MissingProjectId)
    }
}
