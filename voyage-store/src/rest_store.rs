use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use voyage_core::{DataStore, StoreError};
use voyage_shared::Masked;
use crate::app_config::DataStoreConfig;

/// Failure while building the REST client
#[derive(Debug, thiserror::Error)]
pub enum RestClientError {
    #[error("Data store API key is not a valid header value")]
    InvalidApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for a hosted PostgREST-style table API.
///
/// Rows are inserted with `POST {base_url}/rest/v1/{collection}`; the API key
/// goes in both the `apikey` header and as a bearer token.
pub struct RestDataStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestDataStore {
    pub fn new(base_url: &str, api_key: &Masked<String>, timeout: Duration) -> Result<Self, RestClientError> {
        let mut apikey = HeaderValue::from_str(api_key.expose()).map_err(|_| RestClientError::InvalidApiKey)?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| RestClientError::InvalidApiKey)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DataStoreConfig) -> Result<Self, RestClientError> {
        Self::new(
            &config.url,
            &config.api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }
}

/// Pull the human-readable reason out of an error body.
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    ["message", "error_description", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[async_trait]
impl DataStore for RestDataStore {
    async fn insert_one(&self, collection: &str, record: Value) -> Result<(), StoreError> {
        let endpoint = self.endpoint(collection);
        let response = self
            .client
            .post(&endpoint)
            .json(&[record])
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", endpoint, e);
                StoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            debug!("Inserted row into {} ({})", collection, status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!("Insert into {} rejected: {} {}", collection, status, body);
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}
