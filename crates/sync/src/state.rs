//! Client-side collection state and the actions that change it.

use vanity_core::item::MakeupItem;
use vanity_core::types::ItemId;

/// Where the in-memory collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// A refresh is in flight.
    Loading,
    /// The collection was last loaded from the service.
    Ready,
    /// The service could not be reached; the collection is local.
    DegradedLocal,
}

/// Every change to [`InventoryState`] goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start a load. Clears the error and keeps the current items.
    RefreshStarted,
    /// Replace the collection with the service's copy.
    Loaded(Vec<MakeupItem>),
    /// Replace the collection with the local snapshot's copy.
    LoadedLocal(Vec<MakeupItem>),
    /// A mutation is about to be attempted.
    ClearError,
    /// A service call failed; record the message and fall back locally.
    Failed(String),
    /// The service accepted a mutation. A collection that came from the
    /// snapshot stays [`SyncStatus::DegradedLocal`] until the next load.
    Confirmed,
    Inserted(MakeupItem),
    /// Replace the item with the same id. Unknown ids are ignored.
    Replaced(MakeupItem),
    Removed(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryState {
    items: Vec<MakeupItem>,
    status: SyncStatus,
    error: Option<String>,
}

impl Default for InventoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: SyncStatus::Loading,
            error: None,
        }
    }
}

impl InventoryState {
    pub fn items(&self) -> &[MakeupItem] {
        &self.items
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Message from the most recent failed service call, if it has not been
    /// cleared since.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::RefreshStarted => {
                self.status = SyncStatus::Loading;
                self.error = None;
            }
            Action::Loaded(items) => {
                self.items = items;
                self.status = SyncStatus::Ready;
            }
            Action::LoadedLocal(items) => {
                self.items = items;
                self.status = SyncStatus::DegradedLocal;
            }
            Action::ClearError => self.error = None,
            Action::Failed(message) => {
                self.error = Some(message);
                self.status = SyncStatus::DegradedLocal;
            }
            Action::Confirmed => {
                if self.status == SyncStatus::Loading {
                    self.status = SyncStatus::Ready;
                }
            }
            Action::Inserted(item) => self.items.push(item),
            Action::Replaced(item) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == item.id) {
                    *slot = item;
                }
            }
            Action::Removed(id) => self.items.retain(|i| i.id != id),
        }
    }
}
