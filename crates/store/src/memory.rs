//! Process-local backend.
//!
//! Data lives only as long as the process. Used by tests and by
//! `STORE_URL=memory:` for local development.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{KvStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys across all namespaces.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(_, value)| value.clone())
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let store = InMemoryKvStore::new();
        store.set("item:1", json!({"name": "a"})).await.unwrap();
        store.set("item:1", json!({"brand": "b"})).await.unwrap();

        assert_eq!(store.get("item:1").await.unwrap(), Some(json!({"brand": "b"})));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = InMemoryKvStore::new();
        assert_eq!(store.get("item:nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryKvStore::new();
        store.set("item:1", json!(1)).await.unwrap();

        store.delete("item:1").await.unwrap();
        store.delete("item:1").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn scan_prefix_is_literal_and_namespaced() {
        let store = InMemoryKvStore::new();
        store.set("item:1", json!(1)).await.unwrap();
        store.set("item:2", json!(2)).await.unwrap();
        store.set("items_meta", json!(3)).await.unwrap();
        store.set("user:1", json!(4)).await.unwrap();

        let mut values = store.scan_prefix("item:").await.unwrap();
        values.sort_by_key(|v| v.as_i64());
        assert_eq!(values, vec![json!(1), json!(2)]);
        assert!(store.scan_prefix("item%").await.unwrap().is_empty());
    }
}
