use crate::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use dehash_core::monitoring::{
    CreateTaskRequest, DeleteChannelRequest, IdRequest, PageRequest, TaskStatusRequest,
    UpdateChannelRequest, UpdateTaskRequest,
};
use dehash_core::search::{SearchRequest, SearchResponse};
use dehash_core::whois::WhoisRequest;

/// DeHashed configuration resolved from CLI flags and environment variables
#[derive(Debug, Clone)]
pub struct DehashedConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl DehashedConfig {
    /// Default DeHashed v2 API base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://api.dehashed.com/v2";

    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Resolve configuration from global CLI options.
    ///
    /// Clap already merges the DEHASHED_* environment variables into the
    /// global flags, so the only hard requirement left to enforce here is
    /// the API key.
    pub fn from_global(global: &crate::Global) -> Result<Self, Error> {
        let api_key = global.api_key.clone().ok_or_else(|| {
            Error::Config(
                "API key must be provided via --api-key or the DEHASHED_API_KEY environment variable"
                    .to_string(),
            )
        })?;

        Ok(Self {
            api_key,
            base_url: global
                .base_url
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(global.timeout.unwrap_or(Self::DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Create an HTTP client with the DeHashed API key header preset
pub fn create_authenticated_client(config: &DehashedConfig) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|e| Error::Config(f!("Invalid API key value: {e}")))?;
    api_key.set_sensitive(true);
    headers.insert("Dehashed-Api-Key", api_key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| Error::Config(f!("Failed to build HTTP client: {e}")))
}

/// Authenticated DeHashed API client.
///
/// Owns the HTTP connection pool for its lifetime; construct one per command
/// invocation and pass it by reference. Every API operation is a single POST
/// with a JSON body.
pub struct DehashedClient {
    http: reqwest::Client,
    base_url: String,
}

impl DehashedClient {
    pub fn new(config: &DehashedConfig) -> Result<Self, Error> {
        Ok(Self {
            http: create_authenticated_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body to an endpoint and decode the JSON response.
    ///
    /// HTTP statuses map onto the error taxonomy: 401/403 are authentication
    /// failures, 429 is a rate limit, any other non-success status or an
    /// undecodable body is a server response error, and connectivity or
    /// timeout failures are transport errors.
    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = f!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(f!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body_text)
                .unwrap_or_else(|| f!("API request failed with status {status}"));

            return Err(match status.as_u16() {
                401 | 403 => Error::Authentication(message),
                429 => Error::RateLimit(message),
                _ => Error::ServerResponse(f!("[{status}] {message}")),
            });
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| Error::Transport(f!("Failed to read response body: {e}")))?;

        serde_json::from_str(&body_text)
            .map_err(|e| Error::ServerResponse(f!("Failed to parse API response: {e}")))
    }

    /// General search query against the breach database.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Error> {
        self.post("/search", request).await
    }

    /// Search records by password hash. Free, consumes no credits.
    pub async fn search_password(&self, password_hash: &str) -> Result<SearchResponse, Error> {
        self.post("/search-password", &serde_json::json!({ "hash": password_hash }))
            .await
    }

    /// Remaining account credits, read from a minimal probe search.
    /// The API only reports the balance inside search responses.
    pub async fn balance(&self) -> Result<Option<u64>, Error> {
        let probe = SearchRequest {
            query: "email:test@test.com".to_string(),
            page: 1,
            size: 1,
            wildcard: false,
            regex: false,
            de_dupe: false,
        };
        let response = self.search(&probe).await?;
        Ok(response.balance)
    }

    /// WHOIS search. All operations share one endpoint, discriminated by
    /// the request's search_type.
    pub async fn whois(&self, request: &WhoisRequest) -> Result<serde_json::Value, Error> {
        self.post("/whois/search", request).await
    }

    pub async fn monitoring_create_task(
        &self,
        request: &CreateTaskRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/create-task", request).await
    }

    pub async fn monitoring_update_task(
        &self,
        request: &UpdateTaskRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/update-task", request).await
    }

    pub async fn monitoring_set_task_status(
        &self,
        request: &TaskStatusRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/update-task", request).await
    }

    pub async fn monitoring_delete_task(&self, task_id: &str) -> Result<serde_json::Value, Error> {
        let request = IdRequest {
            id: task_id.to_string(),
        };
        self.post("/monitoring/delete-task", &request).await
    }

    pub async fn monitoring_get_tasks(&self, page: usize) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/get-tasks", &PageRequest { page })
            .await
    }

    pub async fn monitoring_get_task(&self, task_id: &str) -> Result<serde_json::Value, Error> {
        let request = IdRequest {
            id: task_id.to_string(),
        };
        self.post("/monitoring/get-task", &request).await
    }

    pub async fn monitoring_get_reports(&self, page: usize) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/get-reports", &PageRequest { page })
            .await
    }

    pub async fn monitoring_get_report(&self, report_id: &str) -> Result<serde_json::Value, Error> {
        let request = IdRequest {
            id: report_id.to_string(),
        };
        self.post("/monitoring/get-report", &request).await
    }

    pub async fn monitoring_get_channels(&self) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/get-channels", &serde_json::json!({}))
            .await
    }

    pub async fn monitoring_update_channel(
        &self,
        request: &UpdateChannelRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/update-channel", request).await
    }

    pub async fn monitoring_delete_channel(
        &self,
        request: &DeleteChannelRequest,
    ) -> Result<serde_json::Value, Error> {
        self.post("/monitoring/delete-channel", request).await
    }
}

/// Pull a human-readable message out of an API error body.
///
/// Error bodies usually carry a `message` or `error` field; fall back to the
/// raw body when they don't.
fn extract_error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
        if let Some(error) = value.get("error").and_then(|v| v.as_str()) {
            return Some(error.to_string());
        }
    }

    if body.trim().is_empty() {
        None
    } else {
        Some(body.trim().to_string())
    }
}
