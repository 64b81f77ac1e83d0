//! Minimal Google Sheets v4 `spreadsheets.values` client.
//!
//! Only the two calls the job needs: read one row, write one cell. Every
//! request carries the bearer token obtained at connect time; a run never
//! outlives it.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::fetch_access_token;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

/// Entered values are parsed as if typed into the UI, so numbers stay numbers.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct SheetsClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl SheetsClient {
    /// Authenticate with `key` against the production Sheets API.
    ///
    /// # Errors
    ///
    /// Returns the token-exchange errors of
    /// [`fetch_access_token`](crate::auth::fetch_access_token), or
    /// [`SheetsError::Http`] if the HTTP client cannot be built.
    pub async fn connect(key: &ServiceAccountKey, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::connect_with_base_url(key, timeout_secs, DEFAULT_BASE_URL).await
    }

    /// Authenticate with `key` against a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// As [`SheetsClient::connect`], plus [`SheetsError::InvalidBaseUrl`].
    pub async fn connect_with_base_url(
        key: &ServiceAccountKey,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let http = build_http(timeout_secs)?;
        let token = fetch_access_token(&http, key).await?;
        Self::from_parts(http, token.access_token, base_url)
    }

    /// Client with an already-issued access token.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the HTTP client cannot be built or
    /// [`SheetsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_access_token(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        Self::from_parts(build_http(timeout_secs)?, access_token.to_owned(), base_url)
    }

    fn from_parts(http: Client, access_token: String, base_url: &str) -> Result<Self, SheetsError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|_| SheetsError::InvalidBaseUrl(base_url.to_owned()))?;
        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    /// Cell values of the first row in `range`, as displayed text.
    ///
    /// Trailing empty cells are omitted by the API, so the result may be
    /// shorter than the sheet is wide. An empty row yields an empty vector.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn row_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<String>, SheetsError> {
        let url = self.values_url(spreadsheet_id, range)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;

        let value_range: ValueRange =
            serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
                context: format!("values.get({range})"),
                source: e,
            })?;

        Ok(value_range
            .values
            .into_iter()
            .next()
            .unwrap_or_default()
            .iter()
            .map(cell_text)
            .collect())
    }

    /// Write `value` into the single cell `range`.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Api`] on a non-2xx response.
    /// - [`SheetsError::Http`] on network failure.
    pub async fn update_cell(
        &self,
        spreadsheet_id: &str,
        range: &str,
        value: u64,
    ) -> Result<(), SheetsError> {
        let url = self.values_url(spreadsheet_id, range)?;
        let body = serde_json::json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [[value]],
        });
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// `v4/spreadsheets/{id}/values/{range}` under the base URL, each part
    /// percent-encoded as a single path segment.
    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url, SheetsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SheetsError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
        Ok(url)
    }
}

fn build_http(timeout_secs: u64) -> Result<Client, SheetsError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent("cstrack/0.1 (daily-cs-dashboard)")
        .build()?)
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pass 2xx responses through; map anything else to [`SheetsError::Api`]
/// carrying Google's `error.message` when the body has one.
async fn check_status(response: Response) -> Result<Response, SheetsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());
    Err(SheetsError::Api {
        status: status.as_u16(),
        message,
    })
}
