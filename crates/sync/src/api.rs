//! HTTP client for the inventory service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use vanity_core::envelope::{BulkResponse, ErrorResponse};
use vanity_core::item::{MakeupItem, MakeupItemInput};

/// Errors talking to the inventory service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Service { status: u16, message: String },

    /// A 2xx response whose envelope reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// The service operations the sync layer depends on.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Raw item records. Older records may lack newer fields.
    async fn list_items(&self) -> Result<Vec<Value>, ApiError>;

    async fn create_item(&self, input: &MakeupItemInput) -> Result<MakeupItem, ApiError>;

    async fn update_item(&self, id: &str, input: &MakeupItemInput)
        -> Result<MakeupItem, ApiError>;

    async fn delete_item(&self, id: &str) -> Result<(), ApiError>;

    /// Push `items` through the bulk endpoint. A partial success (207) is
    /// returned as `Ok` with the failed elements listed.
    async fn bulk_create(&self, items: &[MakeupItem]) -> Result<BulkResponse, ApiError>;
}

/// `{ "success": ..., "data": ..., "error": ... }` as returned on 2xx.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

/// [`InventoryApi`] over HTTP using [`reqwest`].
pub struct HttpInventoryApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventoryApi {
    /// Create a client for the service at `base_url` with a per-request
    /// timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Append `segments` to the base URL. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay a single path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Check the status and unwrap the `data` field of the envelope.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let envelope: Envelope<T> = response.json().await?;
        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope { error, .. } => Err(ApiError::Rejected(
                error.unwrap_or_else(|| "Response carried no data".to_string()),
            )),
        }
    }

    /// Return the response on 2xx, otherwise an [`ApiError::Service`] with
    /// the envelope's error message (or the raw body if there is none).
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status.as_u16())
                } else {
                    body
                }
            });
        Err(ApiError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_items(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.client.get(self.url(&["makeup-items"])).send().await?;
        Self::parse_data(response).await
    }

    async fn create_item(&self, input: &MakeupItemInput) -> Result<MakeupItem, ApiError> {
        let response = self
            .client
            .post(self.url(&["makeup-items"]))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn update_item(
        &self,
        id: &str,
        input: &MakeupItemInput,
    ) -> Result<MakeupItem, ApiError> {
        let response = self
            .client
            .put(self.url(&["makeup-items", id]))
            .json(input)
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&["makeup-items", id]))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let ack: Envelope<Value> = response.json().await?;
        if !ack.success {
            return Err(ApiError::Rejected(
                ack.error.unwrap_or_else(|| "Delete was not acknowledged".to_string()),
            ));
        }
        Ok(())
    }

    async fn bulk_create(&self, items: &[MakeupItem]) -> Result<BulkResponse, ApiError> {
        let response = self
            .client
            .post(self.url(&["makeup-items", "bulk"]))
            .json(&serde_json::json!({ "items": items }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
