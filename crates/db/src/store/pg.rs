use async_trait::async_trait;
use larder_core::item_query::ItemQuery;
use larder_core::types::DbId;

use crate::models::category::{Category, CreateCategory};
use crate::models::grocery::GroceryEntry;
use crate::models::item::{Item, NewItem};
use crate::repositories::{CategoryRepo, GroceryRepo, ItemRepo};
use crate::store::{InventoryStore, StoreError};
use crate::DbPool;

/// [`InventoryStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_item(&self, item: &NewItem) -> Result<DbId, StoreError> {
        Ok(ItemRepo::insert(&self.pool, item).await?)
    }

    async fn delete_item(&self, id: DbId) -> Result<u64, StoreError> {
        Ok(ItemRepo::delete(&self.pool, id).await?)
    }

    async fn find_item(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        ItemRepo::find_by_id(&self.pool, id)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn find_items(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError> {
        let rows = ItemRepo::find(&self.pool, query).await?;
        tracing::debug!(
            rows = rows.len(),
            conditions = query.conditions.len(),
            "Item query executed"
        );

        rows.into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| tracing::warn!(error = %e, "Undecodable item row"))
    }

    async fn replace_item(&self, item: &Item) -> Result<bool, StoreError> {
        Ok(ItemRepo::replace(&self.pool, item).await?)
    }

    async fn insert_category(&self, input: &CreateCategory) -> Result<Category, StoreError> {
        Ok(CategoryRepo::create(&self.pool, input).await?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::list(&self.pool).await?)
    }

    async fn replace_grocery_list(&self, entries: &[GroceryEntry]) -> Result<(), StoreError> {
        let written = GroceryRepo::replace_all(&self.pool, entries).await?;
        tracing::debug!(
            written,
            skipped = entries.len() as u64 - written,
            "Grocery list replaced"
        );
        Ok(())
    }

    async fn grocery_list(&self) -> Result<Vec<GroceryEntry>, StoreError> {
        Ok(GroceryRepo::list(&self.pool).await?)
    }
}
