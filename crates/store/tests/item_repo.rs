//! Tests for `ItemRepo` over the in-memory backend.

use serde_json::json;
use vanity_core::item::{MakeupItem, MakeupType};
use vanity_store::keys::item_key;
use vanity_store::memory::InMemoryKvStore;
use vanity_store::repositories::ItemRepo;
use vanity_store::KvStore;

fn item(id: &str, name: &str) -> MakeupItem {
    MakeupItem {
        id: id.into(),
        name: name.into(),
        brand: "NARS".into(),
        kind: MakeupType::Blush,
        shade: Some("Orgasm".into()),
        purchase_date: None,
        price: 210.0,
        acquisition_price: 180.0,
        was_gift: false,
        notes: String::new(),
    }
}

#[tokio::test]
async fn upsert_then_find_returns_wire_record() {
    let store = InMemoryKvStore::new();
    ItemRepo::upsert(&store, &item("a1", "Blush")).await.unwrap();

    let stored = ItemRepo::find(&store, "a1").await.unwrap().unwrap();
    assert_eq!(stored["id"], "a1");
    assert_eq!(stored["type"], "Blush");
    assert_eq!(stored["acquisitionPrice"], 180.0);
}

#[tokio::test]
async fn list_only_returns_item_namespace() {
    let store = InMemoryKvStore::new();
    ItemRepo::upsert(&store, &item("a1", "One")).await.unwrap();
    ItemRepo::upsert(&store, &item("a2", "Two")).await.unwrap();
    store.set("settings:theme", json!("dark")).await.unwrap();

    let listed = ItemRepo::list(&store).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|v| v["brand"] == "NARS"));
}

#[tokio::test]
async fn list_passes_legacy_records_through_untouched() {
    let store = InMemoryKvStore::new();
    store
        .set(&item_key("old"), json!({"id": "old", "name": "Legacy", "price": 10}))
        .await
        .unwrap();

    let listed = ItemRepo::list(&store).await.unwrap();
    assert_eq!(listed, vec![json!({"id": "old", "name": "Legacy", "price": 10})]);
}

#[tokio::test]
async fn delete_twice_succeeds() {
    let store = InMemoryKvStore::new();
    ItemRepo::upsert(&store, &item("a1", "One")).await.unwrap();

    ItemRepo::delete(&store, "a1").await.unwrap();
    ItemRepo::delete(&store, "a1").await.unwrap();
    assert!(ItemRepo::find(&store, "a1").await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_upsert_reports_one_result_per_item() {
    let store = InMemoryKvStore::new();
    let items = vec![item("b1", "One"), item("b2", "Two"), item("b3", "Three")];

    let results = ItemRepo::bulk_upsert(&store, &items).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(ItemRepo::list(&store).await.unwrap().len(), 3);
}
