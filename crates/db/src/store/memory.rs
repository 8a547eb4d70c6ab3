use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use larder_core::item_query::{Condition, ItemQuery, SortOrder, TextField};
use larder_core::types::DbId;
use regex::Regex;
use tokio::sync::RwLock;

use crate::models::category::{Category, CreateCategory};
use crate::models::grocery::GroceryEntry;
use crate::models::item::{Item, ItemRow, NewItem};
use crate::store::{InventoryStore, StoreError};

/// In-process [`InventoryStore`] holding raw item rows behind a `RwLock`.
///
/// Rows are decoded on read exactly like the PostgreSQL store, so a row with
/// a bad status code surfaces as [`StoreError::Decode`]. The store can be
/// switched offline to simulate an unreachable database.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    offline: AtomicBool,
}

#[derive(Default)]
struct MemoryState {
    last_item_id: DbId,
    items: BTreeMap<DbId, ItemRow>,
    last_category_id: DbId,
    categories: Vec<Category>,
    grocery_list: Vec<GroceryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with [`StoreError::Query`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Store a row verbatim, bypassing model conversion.
    pub async fn insert_row(&self, row: ItemRow) {
        let mut state = self.state.write().await;
        state.last_item_id = state.last_item_id.max(row.id);
        state.items.insert(row.id, row);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Query("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn insert_item(&self, item: &NewItem) -> Result<DbId, StoreError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        state.last_item_id += 1;
        let id = state.last_item_id;
        let row = ItemRow::from(&item.clone().into_item(id));
        state.items.insert(id, row);
        Ok(id)
    }

    async fn delete_item(&self, id: DbId) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.items.remove(&id) {
            Some(_) => {
                state.grocery_list.retain(|entry| entry.item_id != id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_item(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        self.check_online()?;
        let state = self.state.read().await;
        state.items.get(&id).cloned().map(Item::try_from).transpose()
    }

    async fn find_items(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        self.check_online()?;
        let matchers = compile_conditions(&query.conditions)?;

        let state = self.state.read().await;
        let mut rows: Vec<&ItemRow> = state
            .items
            .values()
            .filter(|row| matchers.iter().all(|m| m.matches(row)))
            .collect();

        match query.sort {
            SortOrder::Storage => {}
            SortOrder::CreatedAsc => rows.sort_by_key(|row| (row.created_at, row.id)),
            SortOrder::CreatedDesc => {
                rows.sort_by_key(|row| std::cmp::Reverse((row.created_at, row.id)))
            }
        }

        let limit = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        rows.into_iter()
            .take(limit)
            .cloned()
            .map(Item::try_from)
            .collect()
    }

    async fn replace_item(&self, item: &Item) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        match state.items.get_mut(&item.id) {
            Some(row) => {
                let created_at = row.created_at;
                *row = ItemRow::from(item);
                row.created_at = created_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_category(&self, input: &CreateCategory) -> Result<Category, StoreError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.name == input.name) {
            return Err(StoreError::Conflict(
                "violates unique constraint uq_categories_name".into(),
            ));
        }

        state.last_category_id += 1;
        let category = Category {
            id: state.last_category_id,
            name: input.name.clone(),
            low_threshold: input.low_threshold,
            ok_threshold: input.ok_threshold,
            created_at: Utc::now(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.check_online()?;
        let state = self.state.read().await;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn replace_grocery_list(&self, entries: &[GroceryEntry]) -> Result<(), StoreError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        let live: Vec<GroceryEntry> = entries
            .iter()
            .filter(|entry| state.items.contains_key(&entry.item_id))
            .cloned()
            .collect();
        state.grocery_list = live;
        Ok(())
    }

    async fn grocery_list(&self) -> Result<Vec<GroceryEntry>, StoreError> {
        self.check_online()?;
        Ok(self.state.read().await.grocery_list.clone())
    }
}

// ---------------------------------------------------------------------------
// Condition evaluation
// ---------------------------------------------------------------------------

/// A condition with its pattern compiled once per query.
enum Matcher<'a> {
    Pattern(TextField, Regex),
    Other(&'a Condition),
}

impl Matcher<'_> {
    fn matches(&self, row: &ItemRow) -> bool {
        match self {
            Matcher::Pattern(field, regex) => regex.is_match(text_field(row, *field)),
            Matcher::Other(Condition::StatusIs(status)) => row.status == status.code(),
            Matcher::Other(Condition::ExpiresWithin { after, until }) => row
                .expiry
                .is_some_and(|expiry| expiry > *after && expiry <= *until),
            // Patterns are always compiled into `Matcher::Pattern`.
            Matcher::Other(Condition::Matches { .. }) => false,
        }
    }
}

fn compile_conditions(conditions: &[Condition]) -> Result<Vec<Matcher<'_>>, StoreError> {
    conditions
        .iter()
        .map(|condition| match condition {
            Condition::Matches { field, pattern } => Regex::new(pattern)
                .map(|regex| Matcher::Pattern(*field, regex))
                .map_err(|e| StoreError::Query(format!("invalid pattern {pattern:?}: {e}"))),
            other => Ok(Matcher::Other(other)),
        })
        .collect()
}

fn text_field(row: &ItemRow, field: TextField) -> &str {
    match field {
        TextField::Name => &row.name,
        TextField::Category => &row.category,
        TextField::Location => &row.location,
    }
}
