//! `HttpInventoryApi` against the real service router over an in-memory
//! store.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::json;
use vanity_api::config::ServerConfig;
use vanity_api::router::build_app_router;
use vanity_api::state::AppState;
use vanity_core::item::{MakeupItemInput, MakeupType};
use vanity_store::memory::InMemoryKvStore;
use vanity_store::KvStore;
use vanity_sync::{
    ApiError, HttpInventoryApi, InventoryApi, LocalSnapshot, MemorySnapshot, SyncStatus,
    SyncedInventory,
};

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Serve the inventory service on an ephemeral port and return its base URL.
async fn spawn_service(store: Arc<InMemoryKvStore>) -> String {
    let config = test_config();
    let app = build_app_router(AppState::new(store), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpInventoryApi {
    HttpInventoryApi::new(base_url, Duration::from_secs(5)).unwrap()
}

fn ruby_woo() -> MakeupItemInput {
    MakeupItemInput {
        name: "Ruby Woo".into(),
        brand: "MAC".into(),
        kind: Some(MakeupType::Lipstick),
        price: Some(120.0),
        acquisition_price: Some(0.0),
        was_gift: Some(false),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_list_update_delete_round_trip() {
    let api = client(&spawn_service(Arc::new(InMemoryKvStore::new())).await);

    let created = api.create_item(&ruby_woo()).await.unwrap();
    assert_eq!(created.acquisition_price, 120.0);

    let records = api.list_items().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], created.id.as_str());

    let mut gift = ruby_woo();
    gift.was_gift = Some(true);
    let updated = api.update_item(&created.id, &gift).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.acquisition_price, 0.0);

    api.delete_item(&created.id).await.unwrap();
    api.delete_item(&created.id).await.unwrap();
    assert!(api.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn ids_with_reserved_url_characters_reach_their_own_record() {
    let store = Arc::new(InMemoryKvStore::new());
    let api = client(&spawn_service(store.clone()).await);
    let odd_id = "a?b/c#d";

    let mut input = ruby_woo();
    input.id = Some(odd_id.into());
    let created = api.create_item(&input).await.unwrap();
    assert_eq!(created.id, odd_id);

    let mut renamed = ruby_woo();
    renamed.name = "Renamed".into();
    let updated = api.update_item(odd_id, &renamed).await.unwrap();
    assert_eq!(updated.id, odd_id);

    let records = api.list_items().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], odd_id);
    assert_eq!(records[0]["name"], "Renamed");
    assert!(store.get("item:a").await.unwrap().is_none());

    api.delete_item(odd_id).await.unwrap();
    assert!(store.get("item:a?b/c#d").await.unwrap().is_none());
    assert!(api.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn validation_failure_surfaces_service_message() {
    let api = client(&spawn_service(Arc::new(InMemoryKvStore::new())).await);
    let mut input = ruby_woo();
    input.name = String::new();

    let err = api.create_item(&input).await.unwrap_err();

    assert_matches!(
        err,
        ApiError::Service { status: 400, ref message } if message == "name is required"
    );
}

#[tokio::test]
async fn bulk_create_keeps_supplied_ids() {
    let store = Arc::new(InMemoryKvStore::new());
    let api = client(&spawn_service(store.clone()).await);
    let items = vec![
        ruby_woo().finalize("1700000000000".into()).unwrap(),
        ruby_woo().finalize("1700000000001".into()).unwrap(),
    ];

    let report = api.bulk_create(&items).await.unwrap();

    assert!(report.success);
    assert_eq!(report.count, 2);
    assert!(store.get("item:1700000000001").await.unwrap().is_some());
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .list_items()
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Request(_));
}

#[tokio::test]
async fn synced_inventory_pushes_offline_items_once_service_is_up() {
    let snapshot = Arc::new(MemorySnapshot::with_contents(
        json!([{"id": "1700000000000", "name": "Old", "brand": "B", "type": "Batom", "price": 30}])
            .to_string(),
    ));
    let store = Arc::new(InMemoryKvStore::new());
    let api = client(&spawn_service(store.clone()).await);
    let mut inventory = SyncedInventory::new(Arc::new(api), snapshot.clone());

    inventory.refresh().await;

    assert_eq!(inventory.status(), SyncStatus::Ready);
    assert_eq!(inventory.items().len(), 1);
    assert_eq!(inventory.items()[0].acquisition_price, 30.0);
    assert!(store.get("item:1700000000000").await.unwrap().is_some());
    assert_eq!(snapshot.read().await.unwrap(), None);
}
