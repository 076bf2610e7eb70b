//! Inventory operations over the item store, independent of HTTP.
//!
//! Storage faults are tagged with a stable, operation-specific message. The
//! backend detail is only logged when the error is turned into a response.

use serde_json::Value;
use vanity_core::envelope::{BulkFailure, BulkResponse};
use vanity_core::error::CoreError;
use vanity_core::ids::mint_item_id;
use vanity_core::item::{MakeupItem, MakeupItemInput};
use vanity_core::types::ItemId;
use vanity_store::repositories::ItemRepo;
use vanity_store::{SharedStore, StoreError};

use crate::error::{AppError, AppResult};

const FETCH_FAILED: &str = "Failed to fetch items";
const FETCH_ONE_FAILED: &str = "Failed to fetch item";
const CREATE_FAILED: &str = "Failed to create item";
const UPDATE_FAILED: &str = "Failed to update item";
const DELETE_FAILED: &str = "Failed to delete item";
const BULK_FAILED: &str = "Failed to bulk create items";

/// Message reported for a bulk element whose write failed.
const BULK_ITEM_STORE_FAILED: &str = "Failed to store item";

/// CRUD and bulk insert for makeup items.
#[derive(Clone)]
pub struct InventoryService {
    store: SharedStore,
}

impl InventoryService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }

    /// Every stored record, unordered and unpaginated.
    pub async fn list_items(&self) -> AppResult<Vec<Value>> {
        let items = ItemRepo::list(self.store.as_ref())
            .await
            .map_err(AppError::store(FETCH_FAILED))?;
        tracing::info!(count = items.len(), "Retrieved makeup items");
        Ok(items)
    }

    pub async fn get_item(&self, id: &str) -> AppResult<Value> {
        ItemRepo::find(self.store.as_ref(), id)
            .await
            .map_err(AppError::store(FETCH_ONE_FAILED))?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Makeup item",
                    id: id.to_string(),
                })
            })
    }

    /// Store a new item, minting an id unless the caller supplied one.
    ///
    /// An existing record with the same id is overwritten.
    pub async fn create_item(&self, input: MakeupItemInput) -> AppResult<MakeupItem> {
        let id = supplied_id(&input).unwrap_or_else(mint_item_id);
        let item = input.finalize(id)?;

        ItemRepo::upsert(self.store.as_ref(), &item)
            .await
            .map_err(AppError::store(CREATE_FAILED))?;

        tracing::info!(item_id = %item.id, "Created makeup item");
        Ok(item)
    }

    /// Replace the whole record at `id`.
    ///
    /// Creates the record when none exists. Any id in the body is ignored.
    pub async fn update_item(&self, id: &str, input: MakeupItemInput) -> AppResult<MakeupItem> {
        let item = input.finalize(id.to_string())?;

        ItemRepo::upsert(self.store.as_ref(), &item)
            .await
            .map_err(AppError::store(UPDATE_FAILED))?;

        tracing::info!(item_id = %item.id, "Updated makeup item");
        Ok(item)
    }

    /// Remove the record at `id`. Succeeds when it does not exist.
    pub async fn delete_item(&self, id: &str) -> AppResult<()> {
        ItemRepo::delete(self.store.as_ref(), id)
            .await
            .map_err(AppError::store(DELETE_FAILED))?;

        tracing::info!(item_id = %id, "Deleted makeup item");
        Ok(())
    }

    /// Insert every element of `items`, which must be a JSON array.
    ///
    /// Elements are validated and written independently: one bad element
    /// does not stop the others. The report lists each failed element by
    /// index. Only when every write fails on storage is the whole call an
    /// error.
    pub async fn bulk_create(&self, items: Value) -> AppResult<BulkResponse> {
        let Value::Array(elements) = items else {
            return Err(CoreError::Validation("Items must be an array".into()).into());
        };
        let total = elements.len();

        let mut failures = Vec::new();
        let mut positions = Vec::with_capacity(total);
        let mut accepted = Vec::with_capacity(total);

        for (index, element) in elements.into_iter().enumerate() {
            match prepare_bulk_element(element) {
                Ok(item) => {
                    positions.push(index);
                    accepted.push(item);
                }
                Err((id, error)) => failures.push(BulkFailure { index, id, error }),
            }
        }

        let results = ItemRepo::bulk_upsert(self.store.as_ref(), &accepted).await;

        let mut count = 0;
        let mut first_store_error = None;
        for ((index, item), result) in positions.into_iter().zip(&accepted).zip(results) {
            match result {
                Ok(()) => count += 1,
                Err(e) => {
                    tracing::error!(error = %e, item_id = %item.id, "Bulk item write failed");
                    failures.push(BulkFailure {
                        index,
                        id: Some(item.id.clone()),
                        error: BULK_ITEM_STORE_FAILED.to_string(),
                    });
                    if first_store_error.is_none() {
                        first_store_error = Some(e);
                    }
                }
            }
        }

        if count == 0 && !accepted.is_empty() {
            if let Some(source) = first_store_error {
                return Err(AppError::Store {
                    context: BULK_FAILED,
                    source,
                });
            }
        }

        failures.sort_by_key(|f| f.index);
        tracing::info!(count, failed = failures.len(), "Bulk created makeup items");

        let error = (!failures.is_empty())
            .then(|| format!("{} of {total} items could not be stored", failures.len()));

        Ok(BulkResponse {
            success: failures.is_empty(),
            count,
            failures,
            error,
        })
    }
}

/// The caller-supplied id, if it is non-blank.
fn supplied_id(input: &MakeupItemInput) -> Option<ItemId> {
    input.id.clone().filter(|id| !id.trim().is_empty())
}

/// Parse and finalize one bulk element, minting an id if it has none.
///
/// On failure returns the caller-supplied id (if any) and a message.
fn prepare_bulk_element(element: Value) -> Result<MakeupItem, (Option<ItemId>, String)> {
    let input: MakeupItemInput =
        serde_json::from_value(element).map_err(|e| (None, format!("Malformed item: {e}")))?;
    let supplied = supplied_id(&input);
    let id = supplied.clone().unwrap_or_else(mint_item_id);
    input.finalize(id).map_err(|e| {
        let message = match e {
            CoreError::Validation(msg) => msg,
            other => other.to_string(),
        };
        (supplied, message)
    })
}
