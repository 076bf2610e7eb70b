//! `vanity-sync` -- load the collection once and report on it.
//!
//! Pushes any locally held items back to the service as a side effect of
//! the refresh.
//!
//! # Environment variables
//!
//! | Variable              | Default                 |
//! |-----------------------|-------------------------|
//! | `API_BASE_URL`        | `http://localhost:3001` |
//! | `SNAPSHOT_DIR`        | `.vanity`               |
//! | `CLIENT_TIMEOUT_SECS` | `10`                    |

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vanity_sync::config::ClientConfig;
use vanity_sync::{FileSnapshot, HttpInventoryApi, SyncedInventory};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vanity_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        snapshot_dir = %config.snapshot_dir.display(),
        "Starting vanity-sync",
    );

    let api = HttpInventoryApi::new(
        &config.api_base_url,
        Duration::from_secs(config.timeout_secs),
    )
    .expect("Failed to build HTTP client");
    let snapshot = FileSnapshot::new(&config.snapshot_dir);

    let mut inventory = SyncedInventory::new(Arc::new(api), Arc::new(snapshot));
    inventory.refresh().await;

    if let Some(error) = inventory.error() {
        tracing::warn!(%error, "Working from local data");
    }

    let summary = inventory.summary();
    tracing::info!(
        status = ?inventory.status(),
        items = summary.item_count,
        total_value = summary.total_value,
        total_spent = summary.total_spent,
        gifts = summary.gift_count,
        "Collection summary",
    );

    for kind in inventory.distinct_types() {
        let count = inventory.items().iter().filter(|i| i.kind == kind).count();
        tracing::info!(kind = %kind, count, "Category");
    }
}
