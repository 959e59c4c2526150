//! HTTP client for the dashboard backend.
//!
//! Wraps `reqwest` with base-URL normalization, status checking, and typed
//! response decoding. Dataset bodies are tolerated in any JSON shape and
//! handed to the core as [`MetricRecord`]s.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use socialdash_core::{records_from_json, AppConfig, MetricRecord};

use crate::error::ClientError;
use crate::normalize::normalize_data_path;
use crate::types::DatasetList;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = "socialdash/0.1 (metrics)";

/// Client for the scraping backend's REST API.
///
/// Use [`DashboardClient::new`] with the loaded config, or
/// [`DashboardClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: Url,
}

impl DashboardClient {
    /// Creates a client from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `api_url` does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client against the default local backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn local() -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join` append to the API prefix instead
        // of replacing its last segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /health`. The body shape is backend-defined and returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a
    /// non-JSON body.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let url = self.endpoint("health")?;
        self.get_json(&url).await
    }

    /// `GET /data/list`: every scraped dataset grouped by platform.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a body
    /// that is not a dataset listing.
    pub async fn list_datasets(&self) -> Result<DatasetList, ClientError> {
        let url = self.endpoint("data/list")?;
        let body = self.get_json(&url).await?;
        let list: DatasetList = decode(body, "data/list")?;
        tracing::debug!(
            youtube = list.youtube.len(),
            instagram = list.instagram.len(),
            "listed datasets"
        );
        Ok(list)
    }

    /// `GET /data/<path>`: the full record array of one dataset.
    ///
    /// `path` is normalized with [`normalize_data_path`]. A JSON array body
    /// yields its elements, an object yields one record, anything else an
    /// empty dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network failure, a non-2xx status, or a
    /// non-JSON body.
    pub async fn fetch_dataset(&self, path: &str) -> Result<Vec<MetricRecord>, ClientError> {
        let normalized = normalize_data_path(path);
        let url = self.endpoint(&format!("data/{normalized}"))?;
        let body = self.get_json(&url).await?;
        let records = records_from_json(body);
        tracing::debug!(path = %normalized, records = records.len(), "fetched dataset");
        Ok(records)
    }

    pub(crate) fn endpoint(&self, relative: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(relative)
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: format!("{}{relative}", self.base_url),
                reason: e.to_string(),
            })
    }

    pub(crate) async fn get_json(&self, url: &Url) -> Result<Value, ClientError> {
        tracing::info!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        read_json(response, url).await
    }

    pub(crate) async fn post_json(&self, url: &Url, body: &Value) -> Result<Value, ClientError> {
        tracing::info!(%url, "POST");
        let response = self.client.post(url.clone()).json(body).send().await?;
        read_json(response, url).await
    }
}

/// Asserts a 2xx status and parses the body as JSON.
async fn read_json(response: Response, url: &Url) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "backend returned error status");
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(body: Value, context: &str) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
