//! OAuth2 JWT-bearer grant for service accounts.
//!
//! The key signs a short-lived RS256 assertion naming the Sheets scope, and
//! the key's `token_uri` exchanges it for a bearer access token.

use jsonwebtoken::{Algorithm, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime; Google rejects anything longer than an hour.
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(key: &ServiceAccountKey, issued_at: i64) -> Self {
        Self {
            iss: key.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Sign the grant assertion for `key` as of `issued_at` (Unix seconds).
///
/// # Errors
///
/// Returns [`SheetsError::Signing`] if the private key cannot sign.
pub fn sign_assertion(key: &ServiceAccountKey, issued_at: i64) -> Result<String, SheetsError> {
    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&key.private_key_id);
    let claims = Claims::new(key, issued_at);
    Ok(jsonwebtoken::encode(&header, &claims, &key.encoding_key()?)?)
}

/// Exchange a freshly signed assertion for an access token.
///
/// # Errors
///
/// - [`SheetsError::Signing`] if the assertion cannot be signed.
/// - [`SheetsError::Unauthorized`] if the token endpoint answers non-2xx.
/// - [`SheetsError::Http`] on network failure.
/// - [`SheetsError::Deserialize`] if the token response is malformed.
pub async fn fetch_access_token(
    http: &Client,
    key: &ServiceAccountKey,
) -> Result<AccessToken, SheetsError> {
    let assertion = sign_assertion(key, chrono::Utc::now().timestamp())?;

    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SheetsError::Unauthorized {
            status: status.as_u16(),
            message: token_error_message(&body),
        });
    }

    let token: AccessToken =
        serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
            context: "token response".to_string(),
            source: e,
        })?;
    tracing::info!(
        client_email = %key.client_email,
        expires_in = ?token.expires_in,
        "service-account access token obtained"
    );
    Ok(token)
}

/// `error_description` (or `error`) from an OAuth error body, else the raw body.
fn token_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error_description")
                .or_else(|| v.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../tests/fixtures/test_service_account.json");

    fn key() -> ServiceAccountKey {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn claims_name_the_sheets_scope_for_one_hour() {
        let claims = Claims::new(&key(), 1_735_776_000);
        assert_eq!(
            claims,
            Claims {
                iss: "cstrack-writer@cstrack-test.iam.gserviceaccount.com".to_string(),
                scope: SHEETS_SCOPE.to_string(),
                aud: "https://oauth2.googleapis.com/token".to_string(),
                iat: 1_735_776_000,
                exp: 1_735_779_600,
            }
        );
    }

    #[test]
    fn assertion_is_rs256_with_key_id() {
        let jwt = sign_assertion(&key(), 1_735_776_000).unwrap();
        let header = jsonwebtoken::decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("test-key-id-0001"));
        assert_eq!(jwt.split('.').count(), 3);
    }

    #[test]
    fn oauth_error_description_is_preferred() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#;
        assert_eq!(token_error_message(body), "Invalid JWT Signature.");
        assert_eq!(token_error_message(r#"{"error":"invalid_grant"}"#), "invalid_grant");
        assert_eq!(token_error_message("  bad gateway \n"), "bad gateway");
    }
}
