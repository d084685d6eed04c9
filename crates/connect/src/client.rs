//! HTTP client for the hosted row-based data service.
//!
//! The service speaks a PostgREST-style dialect: one route per table under
//! `/rest/v1/`, filters as query parameters, upserts via `Prefer` headers.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use grindlog_core::bankroll::{BankrollSnapshotInsert, BankrollSnapshotRow};
use grindlog_core::queue::{MutationOperation, RemoteStore};
use grindlog_core::sessions::SessionRow;
use grindlog_core::sites::SiteRow;

use crate::config::ConnectConfig;
use crate::error::{ConnectError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

/// Error body shape returned by the data service.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Client for the grindlog data service REST API.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    client: reqwest::Client,
    config: ConnectConfig,
}

impl ConnectClient {
    /// Create a new client for the configured endpoint.
    pub fn new(config: ConnectConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        let config = ConnectConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Self { client, config }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// Create headers for an API request.
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| ConnectError::auth("Invalid API key format"))?;
        headers.insert("apikey", api_key);

        let auth_value =
            HeaderValue::from_str(&format!("Bearer {}", self.config.bearer_token()))
                .map_err(|_| ConnectError::auth("Invalid access token format"))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    fn log_response(status: reqwest::StatusCode, body: &str) {
        if status.is_success() {
            debug!("API response status: {}", status);
            return;
        }

        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        debug!("API response error ({}): {}", status, preview);
    }

    fn error_from_body(status: reqwest::StatusCode, body: &str) -> ConnectError {
        if let Ok(error) = serde_json::from_str::<ApiErrorBody>(body) {
            if let Some(message) = error.message {
                let code = error.code.unwrap_or_else(|| "unknown".to_string());
                return ConnectError::api(status.as_u16(), format!("{}: {}", code, message));
            }
        }
        ConnectError::api(status.as_u16(), format!("Request failed: {}", body))
    }

    /// Parse a JSON response body.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        Self::log_response(status, &body);

        if !status.is_success() {
            return Err(Self::error_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize response. Body: {}, Error: {}", body, e);
            ConnectError::api(status.as_u16(), format!("Failed to parse response: {}", e))
        })
    }

    /// Check a response where no body is expected.
    async fn check_response(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            debug!("API response status: {}", status);
            return Ok(());
        }

        let body = response.text().await?;
        Self::log_response(status, &body);
        Err(Self::error_from_body(status, &body))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Row operations (offline queue surface)
    // ─────────────────────────────────────────────────────────────────────

    /// Insert a payload as a new row.
    ///
    /// POST /rest/v1/{table}
    pub async fn insert_row(&self, table: &str, payload: &serde_json::Value) -> Result<()> {
        let mut headers = self.headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let response = self
            .client
            .post(self.rest_url(table))
            .headers(headers)
            .json(payload)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Apply every payload field except `id` as a partial update to the row
    /// the `id` field names.
    ///
    /// PATCH /rest/v1/{table}?id=eq.{id}
    pub async fn update_row(&self, table: &str, payload: &serde_json::Value) -> Result<()> {
        let id = payload_id(payload)?;
        let body = payload_without_id(payload)?;

        let mut headers = self.headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(table),
            urlencoding::encode(&id)
        );
        let response = self
            .client
            .patch(url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Remove the row the payload's `id` field names.
    ///
    /// DELETE /rest/v1/{table}?id=eq.{id}
    pub async fn delete_row(&self, table: &str, payload: &serde_json::Value) -> Result<()> {
        let id = payload_id(payload)?;

        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(table),
            urlencoding::encode(&id)
        );
        let response = self
            .client
            .delete(url)
            .headers(self.headers()?)
            .send()
            .await?;

        Self::check_response(response).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Typed queries (read path for the UI layers)
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch all visible sites, presets first, then by name.
    ///
    /// GET /rest/v1/sites
    pub async fn fetch_sites(&self) -> Result<Vec<SiteRow>> {
        let url = format!(
            "{}?select=*&order=is_preset.desc,name.asc",
            self.rest_url("sites")
        );
        let response = self.client.get(url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch the most recent sessions, newest first.
    ///
    /// GET /rest/v1/sessions
    pub async fn fetch_sessions(&self, limit: u32) -> Result<Vec<SessionRow>> {
        let url = format!(
            "{}?select=*&order=start_time.desc&limit={}",
            self.rest_url("sessions"),
            limit
        );
        let response = self.client.get(url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch sessions starting on one calendar date.
    ///
    /// GET /rest/v1/sessions
    pub async fn fetch_sessions_by_date(&self, date: &str) -> Result<Vec<SessionRow>> {
        let url = format!(
            "{}?select=*&start_time=gte.{date}T00:00:00&start_time=lte.{date}T23:59:59&order=start_time.desc",
            self.rest_url("sessions")
        );
        let response = self.client.get(url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    /// Fetch a user's bankroll snapshots, newest date first.
    ///
    /// GET /rest/v1/bankroll_snapshots
    pub async fn fetch_snapshots(&self, user_id: &str) -> Result<Vec<BankrollSnapshotRow>> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=date.desc",
            self.rest_url("bankroll_snapshots"),
            urlencoding::encode(user_id)
        );
        let response = self.client.get(url).headers(self.headers()?).send().await?;
        Self::parse_response(response).await
    }

    /// Create or replace the snapshot for (user, site, date).
    ///
    /// POST /rest/v1/bankroll_snapshots?on_conflict=user_id,site_id,date
    pub async fn upsert_snapshot(
        &self,
        snapshot: &BankrollSnapshotInsert,
    ) -> Result<BankrollSnapshotRow> {
        let mut headers = self.headers()?;
        headers.insert(
            "Prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
        );

        let url = format!(
            "{}?on_conflict=user_id,site_id,date",
            self.rest_url("bankroll_snapshots")
        );
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(snapshot)
            .send()
            .await?;

        let mut rows: Vec<BankrollSnapshotRow> = Self::parse_response(response).await?;
        rows.pop()
            .ok_or_else(|| ConnectError::api(200, "Upsert returned no rows"))
    }

    /// Delete one snapshot by id.
    ///
    /// DELETE /rest/v1/bankroll_snapshots?id=eq.{id}
    pub async fn delete_snapshot(&self, id: &str) -> Result<()> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url("bankroll_snapshots"),
            urlencoding::encode(id)
        );
        let response = self
            .client
            .delete(url)
            .headers(self.headers()?)
            .send()
            .await?;

        Self::check_response(response).await
    }
}

/// Row id carried in an update/delete payload, as its filter string.
fn payload_id(payload: &serde_json::Value) -> Result<String> {
    match payload.get("id") {
        Some(serde_json::Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(serde_json::Value::Number(id)) => Ok(id.to_string()),
        Some(_) => Err(ConnectError::invalid_request(
            "Payload id must be a string or number",
        )),
        None => Err(ConnectError::invalid_request(
            "Payload is missing the id field",
        )),
    }
}

/// The payload minus its `id` field, as the partial-update body.
fn payload_without_id(payload: &serde_json::Value) -> Result<serde_json::Value> {
    let object = payload.as_object().ok_or_else(|| {
        ConnectError::invalid_request("Mutation payload must be a JSON object")
    })?;

    let body: serde_json::Map<String, serde_json::Value> = object
        .iter()
        .filter(|(key, _)| key.as_str() != "id")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(serde_json::Value::Object(body))
}

#[async_trait]
impl RemoteStore for ConnectClient {
    async fn apply(
        &self,
        table: &str,
        operation: MutationOperation,
        payload: &serde_json::Value,
    ) -> grindlog_core::errors::Result<()> {
        let result = match operation {
            MutationOperation::Insert => self.insert_row(table, payload).await,
            MutationOperation::Update => self.update_row(table, payload).await,
            MutationOperation::Delete => self.delete_row(table, payload).await,
        };
        result.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_id_accepts_strings_and_numbers() {
        assert_eq!(payload_id(&json!({ "id": "row-1" })).unwrap(), "row-1");
        assert_eq!(payload_id(&json!({ "id": 42 })).unwrap(), "42");
    }

    #[test]
    fn payload_id_rejects_missing_or_odd_ids() {
        assert!(matches!(
            payload_id(&json!({ "notes": "x" })),
            Err(ConnectError::InvalidRequest(_))
        ));
        assert!(matches!(
            payload_id(&json!({ "id": true })),
            Err(ConnectError::InvalidRequest(_))
        ));
        assert!(matches!(
            payload_id(&json!({ "id": "" })),
            Err(ConnectError::InvalidRequest(_))
        ));
    }

    #[test]
    fn update_body_drops_only_the_id() {
        let body =
            payload_without_id(&json!({ "id": "row-1", "notes": "ran hot", "profit": 700 }))
                .unwrap();
        assert_eq!(body, json!({ "notes": "ran hot", "profit": 700 }));
    }

    #[test]
    fn update_body_requires_an_object() {
        assert!(matches!(
            payload_without_id(&json!([1, 2, 3])),
            Err(ConnectError::InvalidRequest(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ConnectClient::new(ConnectConfig::new(
            "https://api.example.com/",
            "anon-key",
        ));
        assert_eq!(
            client.rest_url("sessions"),
            "https://api.example.com/rest/v1/sessions"
        );
    }
}
