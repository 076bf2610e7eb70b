//! Vanity inventory REST service library.
//!
//! Exposes the building blocks (config, state, error handling, the
//! transport-free [`inventory::InventoryService`], routes) so integration
//! tests and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod inventory;
pub mod router;
pub mod routes;
pub mod state;
