//! The collection as the client sees it: service-backed when reachable,
//! snapshot-backed when not.
//!
//! Service failures never reach the caller. They are recorded on the state
//! as a message, the change is applied locally, and the whole collection is
//! written to the snapshot. The next successful [`SyncedInventory::refresh`]
//! pushes the snapshot back through the bulk endpoint. Changes the service
//! confirms in the meantime are applied to the pending snapshot as well, so
//! that push never brings back a deleted item or an older version of one.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use vanity_core::catalog::{self, CollectionSummary, ItemFilter};
use vanity_core::error::CoreError;
use vanity_core::ids::mint_local_id;
use vanity_core::item::{MakeupItem, MakeupItemInput, MakeupType};

use crate::api::InventoryApi;
use crate::snapshot::LocalSnapshot;
use crate::state::{Action, InventoryState, SyncStatus};

/// Result of pushing local items to the service.
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// Nothing to push.
    Skipped,
    /// Every item was stored; the snapshot was cleared.
    Completed { count: usize },
    /// Some items were stored; the snapshot now holds only the rest.
    Partial { count: usize, remaining: usize },
    /// The push failed; the snapshot is unchanged.
    Failed { error: String },
}

impl MigrationOutcome {
    /// Whether the service received at least one item.
    pub fn wrote_any(&self) -> bool {
        match self {
            MigrationOutcome::Completed { count } | MigrationOutcome::Partial { count, .. } => {
                *count > 0
            }
            MigrationOutcome::Skipped | MigrationOutcome::Failed { .. } => false,
        }
    }
}

pub struct SyncedInventory {
    state: InventoryState,
    api: Arc<dyn InventoryApi>,
    snapshot: Arc<dyn LocalSnapshot>,
}

impl SyncedInventory {
    pub fn new(api: Arc<dyn InventoryApi>, snapshot: Arc<dyn LocalSnapshot>) -> Self {
        Self {
            state: InventoryState::default(),
            api,
            snapshot,
        }
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn items(&self) -> &[MakeupItem] {
        self.state.items()
    }

    pub fn status(&self) -> SyncStatus {
        self.state.status()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn filtered(&self, filter: &ItemFilter) -> Vec<&MakeupItem> {
        filter.apply(self.items())
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary::of(self.items())
    }

    pub fn distinct_types(&self) -> Vec<MakeupType> {
        catalog::distinct_types(self.items())
    }

    /// Load the collection from the service, falling back to the snapshot.
    pub async fn refresh(&mut self) {
        self.state.apply(Action::RefreshStarted);

        match self.api.list_items().await {
            Ok(records) => {
                let items = normalize_records(records);
                tracing::info!(count = items.len(), "Loaded items from service");
                self.state.apply(Action::Loaded(items));
                self.push_pending_snapshot().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load items from service");
                self.state.apply(Action::Failed(format!("Failed to load items: {e}")));
                self.load_from_snapshot().await;
            }
        }
    }

    /// Push `local_items` through the bulk endpoint.
    ///
    /// Never fails: the outcome is only logged and returned.
    pub async fn migrate(&self, local_items: &[MakeupItem]) -> MigrationOutcome {
        if local_items.is_empty() {
            return MigrationOutcome::Skipped;
        }
        tracing::info!(count = local_items.len(), "Migrating local items to service");

        let report = match self.api.bulk_create(local_items).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "Migration failed, keeping local snapshot");
                return MigrationOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        if report.failures.is_empty() {
            if let Err(e) = self.snapshot.clear().await {
                tracing::warn!(error = %e, "Failed to clear local snapshot after migration");
            }
            tracing::info!(count = report.count, "Migration complete");
            return MigrationOutcome::Completed {
                count: report.count,
            };
        }

        let failed: HashSet<usize> = report.failures.iter().map(|f| f.index).collect();
        let remaining: Vec<MakeupItem> = local_items
            .iter()
            .enumerate()
            .filter(|(index, _)| failed.contains(index))
            .map(|(_, item)| item.clone())
            .collect();
        self.write_snapshot(&remaining).await;

        tracing::warn!(
            count = report.count,
            remaining = remaining.len(),
            "Migration partially complete"
        );
        MigrationOutcome::Partial {
            count: report.count,
            remaining: remaining.len(),
        }
    }

    /// Create an item. Returns the stored record, or the local one if the
    /// service could not be reached.
    pub async fn add_item(&mut self, mut input: MakeupItemInput) -> Result<MakeupItem, CoreError> {
        input.validate()?;
        input.id = None;
        self.state.apply(Action::ClearError);

        match self.api.create_item(&input).await {
            Ok(item) => {
                self.state.apply(Action::Inserted(item.clone()));
                self.state.apply(Action::Confirmed);
                Ok(item)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add item on service, keeping it locally");
                self.state.apply(Action::Failed(format!("Failed to add item: {e}")));
                let item = input.finalize(mint_local_id())?;
                self.state.apply(Action::Inserted(item.clone()));
                self.save_collection().await;
                Ok(item)
            }
        }
    }

    /// Replace the item at `id`. Unknown ids leave the collection unchanged.
    pub async fn update_item(
        &mut self,
        id: &str,
        input: MakeupItemInput,
    ) -> Result<MakeupItem, CoreError> {
        input.validate()?;
        self.state.apply(Action::ClearError);

        match self.api.update_item(id, &input).await {
            Ok(item) => {
                self.state.apply(Action::Replaced(item.clone()));
                self.state.apply(Action::Confirmed);
                self.patch_pending_snapshot(|pending| {
                    if let Some(slot) = pending.iter_mut().find(|i| i.id == item.id) {
                        *slot = item.clone();
                    }
                })
                .await;
                Ok(item)
            }
            Err(e) => {
                tracing::warn!(error = %e, item_id = %id, "Failed to update item on service, updating locally");
                self.state.apply(Action::Failed(format!("Failed to update item: {e}")));
                let item = input.finalize(id.to_string())?;
                self.state.apply(Action::Replaced(item.clone()));
                self.save_collection().await;
                Ok(item)
            }
        }
    }

    pub async fn delete_item(&mut self, id: &str) {
        self.state.apply(Action::ClearError);

        match self.api.delete_item(id).await {
            Ok(()) => {
                self.state.apply(Action::Removed(id.to_string()));
                self.state.apply(Action::Confirmed);
                self.patch_pending_snapshot(|pending| pending.retain(|i| i.id != id))
                    .await;
            }
            Err(e) => {
                tracing::warn!(error = %e, item_id = %id, "Failed to delete item on service, removing locally");
                self.state.apply(Action::Failed(format!("Failed to delete item: {e}")));
                self.state.apply(Action::Removed(id.to_string()));
                self.save_collection().await;
            }
        }
    }

    /// After a successful load, push anything still waiting in the snapshot
    /// and reload if the service accepted some of it.
    async fn push_pending_snapshot(&mut self) {
        let pending = match self.read_snapshot().await {
            Some(Ok(items)) if !items.is_empty() => items,
            _ => return,
        };

        if self.migrate(&pending).await.wrote_any() {
            match self.api.list_items().await {
                Ok(records) => self.state.apply(Action::Loaded(normalize_records(records))),
                Err(e) => tracing::warn!(error = %e, "Failed to reload items after migration"),
            }
        }
    }

    /// Apply a confirmed change to the snapshot, if one is waiting to be
    /// pushed. An unreadable snapshot is left alone.
    async fn patch_pending_snapshot(&self, patch: impl FnOnce(&mut Vec<MakeupItem>)) {
        let mut pending = match self.read_snapshot().await {
            Some(Ok(items)) => items,
            _ => return,
        };
        patch(&mut pending);

        if pending.is_empty() {
            if let Err(e) = self.snapshot.clear().await {
                tracing::warn!(error = %e, "Failed to clear local snapshot");
            }
        } else {
            self.write_snapshot(&pending).await;
        }
    }

    async fn load_from_snapshot(&mut self) {
        match self.read_snapshot().await {
            None => {}
            Some(Ok(items)) => {
                tracing::info!(count = items.len(), "Loaded items from local snapshot");
                self.state.apply(Action::LoadedLocal(items.clone()));
                self.migrate(&items).await;
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Local snapshot is unreadable");
                self.state.apply(Action::LoadedLocal(Vec::new()));
            }
        }
    }

    /// `None` when no snapshot exists.
    async fn read_snapshot(&self) -> Option<Result<Vec<MakeupItem>, String>> {
        match self.snapshot.read().await {
            Ok(None) => None,
            Ok(Some(raw)) => Some(
                serde_json::from_str::<Vec<Value>>(&raw)
                    .map(normalize_records)
                    .map_err(|e| e.to_string()),
            ),
            Err(e) => Some(Err(e.to_string())),
        }
    }

    async fn save_collection(&self) {
        self.write_snapshot(self.items()).await;
    }

    async fn write_snapshot(&self, items: &[MakeupItem]) {
        let result = match serde_json::to_string(items) {
            Ok(contents) => self.snapshot.write(&contents).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write local snapshot");
        }
    }
}

/// Turn raw records into items, filling fields older records lack.
/// Records without an id are dropped.
fn normalize_records(records: Vec<Value>) -> Vec<MakeupItem> {
    records
        .into_iter()
        .filter_map(|record| match MakeupItem::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable item record");
                None
            }
        })
        .collect()
}
