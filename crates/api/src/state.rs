use vanity_store::SharedStore;

use crate::inventory::InventoryService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Item CRUD over the configured store.
    pub inventory: InventoryService,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            inventory: InventoryService::new(store),
        }
    }
}
