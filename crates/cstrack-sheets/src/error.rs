use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while authenticating to or writing the dashboard sheet.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The service-account key file is missing or unreadable.
    #[error("cannot read service-account key {}: {source}", path.display())]
    CredentialFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key file is not a usable service-account key.
    #[error("invalid service-account key {}: {reason}", path.display())]
    CredentialFormat { path: PathBuf, reason: String },

    /// The JWT assertion could not be signed.
    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint rejected the assertion.
    #[error("token exchange rejected ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API answered with a non-2xx status.
    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A response body did not have the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no column labelled \"{label}\" in header row {row}")]
    ColumnNotFound { label: String, row: u32 },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
