use chrono::Utc;

use crate::model::{Cart, LineItem};

use super::*;

fn cart(user_id: &str, items: Vec<LineItem>) -> Cart {
    let now = Utc::now();
    Cart {
        user_id: user_id.to_string(),
        items,
        created_at: now,
        updated_at: now,
    }
}

fn item(product_id: i64, quantity: u32) -> LineItem {
    LineItem {
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let store = MockCartStore::new();
    store.insert(&cart("u1", vec![item(1, 2)])).await.unwrap();

    let found = store.find_by_user("u1").await.unwrap().unwrap();
    assert_eq!(found.items, vec![item(1, 2)]);
    assert!(store.find_by_user("u2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_conflict_on_existing_user() {
    let store = MockCartStore::new();
    store.insert(&cart("u1", vec![item(1, 1)])).await.unwrap();

    let err = store.insert(&cart("u1", vec![item(2, 1)])).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict(ref user) if user == "u1"));
}

#[tokio::test]
async fn test_replace_items_reports_match() {
    let store = MockCartStore::new();
    store.insert(&cart("u1", vec![item(1, 1)])).await.unwrap();

    let now = Utc::now();
    assert!(store
        .replace_items("u1", &[item(1, 5), item(2, 1)], now)
        .await
        .unwrap());
    assert!(!store.replace_items("u2", &[item(1, 1)], now).await.unwrap());

    let found = store.find_by_user("u1").await.unwrap().unwrap();
    assert_eq!(found.items.len(), 2);
    assert_eq!(found.updated_at, now);
}

#[tokio::test]
async fn test_set_item_quantity_replaces_not_creates() {
    let store = MockCartStore::new();
    store.insert(&cart("u1", vec![item(1, 3)])).await.unwrap();

    let now = Utc::now();
    assert!(store.set_item_quantity("u1", 1, 7, now).await.unwrap());
    assert!(!store.set_item_quantity("u1", 99, 7, now).await.unwrap());
    assert!(!store.set_item_quantity("u2", 1, 7, now).await.unwrap());

    let found = store.find_by_user("u1").await.unwrap().unwrap();
    assert_eq!(found.items, vec![item(1, 7)]);
}

#[tokio::test]
async fn test_remove_items_matching() {
    let store = MockCartStore::new();
    store
        .insert(&cart("u1", vec![item(1, 1), item(2, 2)]))
        .await
        .unwrap();

    assert!(store.remove_items_matching("u1", 1).await.unwrap());
    assert!(!store.remove_items_matching("u1", 1).await.unwrap());

    // Document survives with the remaining item
    let found = store.find_by_user("u1").await.unwrap().unwrap();
    assert_eq!(found.items, vec![item(2, 2)]);
}

#[tokio::test]
async fn test_delete_by_user() {
    let store = MockCartStore::new();
    store.insert(&cart("u1", vec![item(1, 1)])).await.unwrap();

    assert_eq!(store.delete_by_user("u1").await.unwrap(), 1);
    assert_eq!(store.delete_by_user("u1").await.unwrap(), 0);
    assert!(store.find_by_user("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failure_toggles() {
    let store = MockCartStore::new();
    store.set_fail_on_read(true).await;
    assert!(matches!(
        store.find_by_user("u1").await,
        Err(StorageError::Unavailable(_))
    ));

    store.set_fail_on_write(true).await;
    assert!(matches!(
        store.delete_by_user("u1").await,
        Err(StorageError::Unavailable(_))
    ));
}
