//! Domain model for the vanity inventory tracker.
//!
//! Shared by the REST service (`vanity-api`), the key-value persistence layer
//! (`vanity-store`) and the client sync layer (`vanity-sync`).

pub mod catalog;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod item;
pub mod types;
