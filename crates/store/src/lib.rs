//! Key-value persistence for the inventory service.
//!
//! [`KvStore`] is the storage seam: opaque JSON values under string keys,
//! namespaced as `<entity-type>:<id>` so one entity type can be listed with a
//! prefix scan. Three backends implement it:
//!
//! - [`memory::InMemoryKvStore`] for development and tests
//! - [`postgres::PgKvStore`] for a PostgreSQL `kv_store` table (sqlx)
//! - [`rest::RestKvStore`] for the same table behind a PostgREST gateway
//!
//! [`repositories::ItemRepo`] layers the makeup-item namespace on top.

pub mod config;
pub mod error;
pub mod keys;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use config::{connect, StoreConfig};
pub use error::StoreError;

/// Shared handle to whichever backend the service was started with.
pub type SharedStore = Arc<dyn KvStore>;

/// Opaque JSON values keyed by string.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Return the value stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value entirely.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Succeeds when the key does not exist.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All values whose key starts with `prefix`, in no particular order.
    ///
    /// The prefix is matched literally.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError>;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
