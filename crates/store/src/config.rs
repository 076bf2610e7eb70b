//! Store connection settings and backend selection.

use std::sync::Arc;

use crate::memory::InMemoryKvStore;
use crate::postgres::PgKvStore;
use crate::rest::RestKvStore;
use crate::{SharedStore, StoreError};

/// Backend credentials, both required at service startup.
///
/// | Env Var             | Example                                  |
/// |---------------------|------------------------------------------|
/// | `STORE_URL`         | `https://abc.supabase.co`, `postgres://app@db/vanity`, `memory:` |
/// | `STORE_SERVICE_KEY` | service-role key / database password     |
#[derive(Clone)]
pub struct StoreConfig {
    pub url: String,
    pub service_key: String,
}

/// Which [`KvStore`](crate::KvStore) implementation a URL selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Postgres,
    Rest,
    Memory,
}

impl StoreConfig {
    /// Build a config, rejecting missing or blank values.
    pub fn new(url: Option<String>, service_key: Option<String>) -> Result<Self, StoreError> {
        let url = non_blank(url)
            .ok_or_else(|| StoreError::Config("STORE_URL must be set".into()))?;
        let service_key = non_blank(service_key)
            .ok_or_else(|| StoreError::Config("STORE_SERVICE_KEY must be set".into()))?;
        Ok(Self { url, service_key })
    }

    /// Load from `STORE_URL` and `STORE_SERVICE_KEY`.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(
            std::env::var("STORE_URL").ok(),
            std::env::var("STORE_SERVICE_KEY").ok(),
        )
    }

    /// Select the backend from the URL scheme.
    pub fn backend(&self) -> Result<BackendKind, StoreError> {
        let scheme = self
            .url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            "http" | "https" => Ok(BackendKind::Rest),
            "memory" => Ok(BackendKind::Memory),
            _ => Err(StoreError::Config(format!(
                "Unsupported STORE_URL scheme in '{}'. Must be one of: postgres, postgresql, http, https, memory",
                self.url
            ))),
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

/// Open the backend named by `config`. PostgreSQL schemas are migrated on
/// connect.
pub async fn connect(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match config.backend()? {
        BackendKind::Postgres => {
            let store = PgKvStore::connect(&config.url, &config.service_key).await?;
            store.run_migrations().await?;
            Arc::new(store)
        }
        BackendKind::Rest => Arc::new(RestKvStore::new(&config.url, config.service_key.clone())),
        BackendKind::Memory => {
            tracing::warn!("Using in-memory store; data will not survive a restart");
            Arc::new(InMemoryKvStore::new())
        }
    };
    Ok(store)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
