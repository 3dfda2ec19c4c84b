//! Client module for the upstream content API
//!
//! Every upstream endpoint answers with a JSON envelope of the form
//! `{ "status": <flag>, "message": <string?>, "result": <payload> }`.
//! [`ApiClient`] issues a single GET per call, checks the transport, the
//! HTTP status and the envelope flag, and hands back the typed payload.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{endpoints, DEFAULT_API_BASE_URL};
use crate::models::{AnimeDetail, HomeData, SearchResultItem, StreamData};

/// Message used when upstream reports a failure without one
const DEFAULT_API_FAILURE: &str = "API request failed";

/// Errors that can occur while fetching from the content API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-related errors (connection timeout, DNS failure, etc.)
    #[error("Failed to connect to server: {0}")]
    NetworkError(String),

    /// HTTP non-success status code
    #[error("Server returned status {0}")]
    HttpError(u16),

    /// Error reading the response body
    #[error("Failed to read response body: {0}")]
    ResponseError(String),

    /// Body is not JSON or the payload has an unexpected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Upstream answered with a falsy status flag
    #[error("{0}")]
    ApiError(String),
}

/// Configuration for the upstream client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Source of upstream content used by the page views
///
/// Implemented by [`ApiClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Home page data for the given page number
    async fn home(&self, page: u32) -> Result<HomeData, FetchError>;

    /// Titles matching a keyword
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, FetchError>;

    /// Title detail for a detail page URL
    async fn detail(&self, url: &str) -> Result<AnimeDetail, FetchError>;

    /// Stream data for an episode page URL
    async fn stream(&self, url: &str) -> Result<StreamData, FetchError>;
}

/// HTTP client for the upstream content API
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| FetchError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path
    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an endpoint path and unwrap the JSON envelope into `T`
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint_url(path);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::NetworkError("Connection timeout".to_string())
                } else if e.is_connect() {
                    FetchError::NetworkError("Failed to connect to server".to_string())
                } else {
                    FetchError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {} for {}", status, url);
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;

        parse_envelope(&body)
    }
}

#[async_trait]
impl ContentFetcher for ApiClient {
    async fn home(&self, page: u32) -> Result<HomeData, FetchError> {
        self.fetch_json(&endpoints::home(page)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, FetchError> {
        self.fetch_json(&endpoints::search(query)).await
    }

    async fn detail(&self, url: &str) -> Result<AnimeDetail, FetchError> {
        self.fetch_json(&endpoints::detail(url)).await
    }

    async fn stream(&self, url: &str) -> Result<StreamData, FetchError> {
        self.fetch_json(&endpoints::stream(url)).await
    }
}

/// Unwrap an upstream envelope body into its typed `result`
pub fn parse_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    let mut envelope: Value =
        serde_json::from_slice(body).map_err(|e| FetchError::DecodeError(e.to_string()))?;

    if !is_truthy(envelope.get("status")) {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_API_FAILURE)
            .to_string();
        return Err(FetchError::ApiError(message));
    }

    let result = envelope
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null);

    serde_json::from_value(result).map_err(|e| FetchError::DecodeError(e.to_string()))
}

/// JavaScript-style truthiness of an optional JSON value
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
