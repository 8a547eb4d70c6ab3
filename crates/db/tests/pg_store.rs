//! PostgreSQL store tests. They need a reachable server in `DATABASE_URL`,
//! so they are ignored by default: `cargo test -p larder-db -- --ignored`.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use larder_core::item_query::{ItemQuery, SearchCriteria};
use larder_core::status::{Status, ThresholdTable};
use larder_core::types::{Timestamp, EPOCH};
use larder_db::models::category::CreateCategory;
use larder_db::models::grocery::GroceryEntry;
use larder_db::models::item::CreateItem;
use larder_db::store::{InventoryStore, PgStore, StoreError};
use sqlx::PgPool;

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn create(name: &str, quantity: f64, category: &str, location: &str) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        quantity,
        unit: "kg".to_string(),
        location: location.to_string(),
        category: category.to_string(),
        expiry: None,
    }
}

async fn insert(store: &PgStore, input: CreateItem, created_at: Timestamp) -> i64 {
    let item = input.into_new_item(&ThresholdTable::default(), created_at);
    store.insert_item(&item).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn insert_and_find_round_trip(pool: PgPool) {
    let store = PgStore::new(pool);
    let id = insert(&store, create("almonds", 0.7, "nuts", "pantry"), t0()).await;

    let item = store.find_item(id).await.unwrap().unwrap();
    assert_eq!(item.name, "Almonds");
    assert_eq!(item.status, Status::High);
    assert_eq!(item.created_at, t0());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn search_uses_regex_filters_and_recency(pool: PgPool) {
    let store = PgStore::new(pool);
    insert(&store, create("rice", 2.0, "basic pantry items", "pantry"), t0()).await;
    insert(
        &store,
        create("rice flour", 2.0, "basic pantry items", "shelf"),
        t0() + Duration::hours(1),
    )
    .await;
    insert(&store, create("cashews", 2.0, "nuts", "pantry"), t0() + Duration::hours(2)).await;

    let mut criteria = SearchCriteria {
        query: "Ri".to_string(),
        recent: "true".to_string(),
        ..Default::default()
    };
    let items = store
        .find_items(&ItemQuery::search(&criteria))
        .await
        .unwrap();
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Rice flour", "Rice"]);

    criteria.query.clear();
    criteria.location = "pantry".to_string();
    criteria.recent.clear();
    let items = store
        .find_items(&ItemQuery::search(&criteria))
        .await
        .unwrap();
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Rice", "Cashews"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invalid_regex_is_a_query_error(pool: PgPool) {
    let store = PgStore::new(pool);
    let criteria = SearchCriteria {
        query: "(".to_string(),
        ..Default::default()
    };
    assert_matches!(
        store.find_items(&ItemQuery::search(&criteria)).await,
        Err(StoreError::Query(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn expiring_soon_window(pool: PgPool) {
    let store = PgStore::new(pool);
    let mut soon = create("yogurt", 1.0, "dairy", "fridge");
    soon.expiry = Some(t0() + Duration::days(1));
    let mut later = create("cheese", 1.0, "dairy", "fridge");
    later.expiry = Some(t0() + Duration::days(4));
    let mut edge = create("milk", 1.0, "dairy", "fridge");
    edge.expiry = Some(t0() + Duration::days(3));
    let mut past_edge = create("cream", 1.0, "dairy", "fridge");
    past_edge.expiry = Some(t0() + Duration::days(3) + Duration::seconds(1));
    let mut at_epoch = create("beans", 1.0, "basic pantry items", "shelf");
    at_epoch.expiry = Some(EPOCH);
    for input in [soon, later, edge, past_edge, at_epoch] {
        insert(&store, input, t0()).await;
    }
    insert(&store, create("salt", 1.0, "spices", "shelf"), t0()).await;

    let items = store
        .find_items(&ItemQuery::expiring_soon(t0(), 10))
        .await
        .unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Yogurt", "Milk"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn corrupt_status_is_a_decode_error(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let id = insert(&store, create("salt", 1.0, "spices", "shelf"), t0()).await;
    sqlx::query("UPDATE items SET status = 9 WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    assert_matches!(store.find_item(id).await, Err(StoreError::Decode(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn replace_and_delete(pool: PgPool) {
    let store = PgStore::new(pool);
    let id = insert(&store, create("salt", 1.0, "spices", "shelf"), t0()).await;

    let mut item = store.find_item(id).await.unwrap().unwrap();
    item.location = "drawer".to_string();
    assert!(store.replace_item(&item).await.unwrap());
    assert_eq!(store.find_item(id).await.unwrap().unwrap().location, "drawer");

    assert_eq!(store.delete_item(id).await.unwrap(), 1);
    assert_eq!(store.delete_item(id).await.unwrap(), 0);
    assert!(!store.replace_item(&item).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn categories_are_unique_and_sorted(pool: PgPool) {
    let store = PgStore::new(pool);
    for name in ["spices", "nuts"] {
        store
            .insert_category(&CreateCategory {
                name: name.to_string(),
                low_threshold: 0.1,
                ok_threshold: 0.2,
            })
            .await
            .unwrap();
    }

    let duplicate = CreateCategory {
        name: "nuts".to_string(),
        low_threshold: 0.1,
        ok_threshold: 0.2,
    };
    assert_matches!(store.insert_category(&duplicate).await, Err(StoreError::Conflict(_)));

    let names: Vec<_> = store
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["nuts", "spices"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn grocery_list_is_replaced_wholesale(pool: PgPool) {
    let store = PgStore::new(pool);
    let id = insert(&store, create("salt", 0.01, "spices", "shelf"), t0()).await;
    let item = store.find_item(id).await.unwrap().unwrap();

    let entries = vec![GroceryEntry::from_item(&item, t0())];
    store.replace_grocery_list(&entries).await.unwrap();
    store.replace_grocery_list(&entries).await.unwrap();
    assert_eq!(store.grocery_list().await.unwrap(), entries);

    store.replace_grocery_list(&[]).await.unwrap();
    assert!(store.grocery_list().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn grocery_list_skips_items_deleted_after_read(pool: PgPool) {
    let store = PgStore::new(pool);
    let kept = insert(&store, create("salt", 0.01, "spices", "shelf"), t0()).await;
    let gone = insert(&store, create("cumin", 0.01, "spices", "shelf"), t0()).await;
    let kept_item = store.find_item(kept).await.unwrap().unwrap();
    let gone_item = store.find_item(gone).await.unwrap().unwrap();
    assert_eq!(store.delete_item(gone).await.unwrap(), 1);

    let entries = vec![
        GroceryEntry::from_item(&kept_item, t0()),
        GroceryEntry::from_item(&gone_item, t0()),
    ];
    store.replace_grocery_list(&entries).await.unwrap();

    let listed = store.grocery_list().await.unwrap();
    assert_eq!(listed, entries[..1].to_vec());
}
