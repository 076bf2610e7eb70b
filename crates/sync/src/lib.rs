//! Offline-tolerant client for the inventory service.
//!
//! [`inventory::SyncedInventory`] keeps the collection in memory, talks to
//! the service through [`api::InventoryApi`], and falls back to a
//! [`snapshot::LocalSnapshot`] whenever the service cannot be reached. Items
//! held only locally are pushed back through the bulk endpoint on the next
//! successful refresh.

pub mod api;
pub mod config;
pub mod inventory;
pub mod snapshot;
pub mod state;

pub use api::{ApiError, HttpInventoryApi, InventoryApi};
pub use inventory::{MigrationOutcome, SyncedInventory};
pub use snapshot::{FileSnapshot, LocalSnapshot, MemorySnapshot, SnapshotError};
pub use state::{Action, InventoryState, SyncStatus};
