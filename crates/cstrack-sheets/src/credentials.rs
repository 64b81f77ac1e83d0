//! Service-account key files as downloaded from the Google Cloud console.

use std::path::Path;

use jsonwebtoken::EncodingKey;
use serde::Deserialize;

use crate::error::SheetsError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of a service-account JSON key needed for the JWT-bearer grant.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"[redacted]")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// RSA signing key from the PEM-encoded `private_key`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Signing`] if the PEM is not an RSA private key.
    pub fn encoding_key(&self) -> Result<EncodingKey, SheetsError> {
        Ok(EncodingKey::from_rsa_pem(self.private_key.as_bytes())?)
    }
}

/// Read and validate the service-account key at `path`.
///
/// The private key is parsed here as well, so a bad key surfaces before any
/// portal work starts.
///
/// # Errors
///
/// - [`SheetsError::CredentialFile`] if the file cannot be read.
/// - [`SheetsError::CredentialFormat`] if it is not a service-account key or
///   its private key is unusable.
pub fn load_service_account_key(path: &Path) -> Result<ServiceAccountKey, SheetsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SheetsError::CredentialFile {
        path: path.to_path_buf(),
        source,
    })?;

    let key: ServiceAccountKey =
        serde_json::from_str(&raw).map_err(|e| SheetsError::CredentialFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    key.encoding_key().map_err(|e| SheetsError::CredentialFormat {
        path: path.to_path_buf(),
        reason: format!("private_key: {e}"),
    })?;

    tracing::debug!(
        client_email = %key.client_email,
        path = %path.display(),
        "service-account key loaded"
    );
    Ok(key)
}
