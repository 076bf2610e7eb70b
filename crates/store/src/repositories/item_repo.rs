//! Repository for makeup items stored under the `item:` namespace.
//!
//! Listing returns raw JSON values rather than [`MakeupItem`]s: records
//! written before newer fields existed are passed through untouched and
//! migrated by the reader.

use futures::future::join_all;
use serde_json::Value;
use vanity_core::item::MakeupItem;

use crate::keys::{item_key, ITEM_PREFIX};
use crate::{KvStore, StoreError};

/// Provides CRUD operations for makeup items over any [`KvStore`].
pub struct ItemRepo;

impl ItemRepo {
    /// All stored item records, unordered.
    pub async fn list(store: &dyn KvStore) -> Result<Vec<Value>, StoreError> {
        store.scan_prefix(ITEM_PREFIX).await
    }

    /// The stored record for `id`, if any.
    pub async fn find(store: &dyn KvStore, id: &str) -> Result<Option<Value>, StoreError> {
        store.get(&item_key(id)).await
    }

    /// Write `item` under its id, replacing any existing record.
    pub async fn upsert(store: &dyn KvStore, item: &MakeupItem) -> Result<(), StoreError> {
        let value = serde_json::to_value(item)?;
        store.set(&item_key(&item.id), value).await
    }

    /// Remove the record for `id`. Succeeds if it does not exist.
    pub async fn delete(store: &dyn KvStore, id: &str) -> Result<(), StoreError> {
        store.delete(&item_key(id)).await
    }

    /// Write every item concurrently.
    ///
    /// Not atomic: the returned results line up with `items` and each one
    /// reports that item's write independently.
    pub async fn bulk_upsert(
        store: &dyn KvStore,
        items: &[MakeupItem],
    ) -> Vec<Result<(), StoreError>> {
        join_all(items.iter().map(|item| Self::upsert(store, item))).await
    }
}
