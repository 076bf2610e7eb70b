//! PostgREST backend.
//!
//! Talks to the `kv_store` table through a PostgREST gateway (as exposed by
//! Supabase at `<url>/rest/v1/<table>`), authenticating every request with
//! the service key as both the `apikey` header and a bearer token.

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::{KvStore, StoreError};

/// Table holding the key-value rows.
pub const DEFAULT_TABLE: &str = "kv_store";

/// Row shape returned by `select=key,value`.
#[derive(Debug, Deserialize)]
struct KeyValueRow {
    key: String,
    value: Value,
}

pub struct RestKvStore {
    client: reqwest::Client,
    table_url: String,
    service_key: String,
}

impl RestKvStore {
    /// Create a store for the default table under `base_url`.
    ///
    /// * `base_url` - Project URL, e.g. `https://abc.supabase.co`.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, service_key, DEFAULT_TABLE)
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        service_key: impl Into<String>,
        table: &str,
    ) -> Self {
        Self {
            client,
            table_url: format!("{}/rest/v1/{table}", base_url.trim_end_matches('/')),
            service_key: service_key.into(),
        }
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Fetch rows matching `filter` on the `key` column.
    async fn select(&self, filter: &str) -> Result<Vec<KeyValueRow>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "key,value"), ("key", filter)])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl KvStore for RestKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let rows = self.select(&format!("eq.{key}")).await?;
        Ok(rows.into_iter().find(|row| row.key == key).map(|row| row.value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST)
            .query(&[("on_conflict", "key")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&serde_json::json!({ "key": key, "value": value }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE)
            .query(&[("key", format!("eq.{key}"))])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        // PostgREST `like` wildcards may over-match; keep literal prefix hits only.
        let rows = self.select(&format!("like.{prefix}*")).await?;
        Ok(rows
            .into_iter()
            .filter(|row| row.key.starts_with(prefix))
            .map(|row| row.value)
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "key"), ("limit", "1")])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Return the response unchanged on 2xx, or a [`StoreError::Backend`] with
/// the status and body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(StoreError::Backend {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
