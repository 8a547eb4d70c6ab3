//! The inventory store abstraction shared by request handlers and jobs.

use async_trait::async_trait;
use larder_core::error::CoreError;
use larder_core::item_query::ItemQuery;
use larder_core::types::DbId;

use crate::models::category::{Category, CreateCategory};
use crate::models::grocery::GroceryEntry;
use crate::models::item::{Item, NewItem};

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure of a store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was unreachable or rejected the query.
    #[error("store query failed: {0}")]
    Query(String),

    /// A stored record could not be turned back into a model.
    #[error("stored record could not be decoded: {0}")]
    Decode(String),

    /// A uniqueness constraint was violated.
    #[error("duplicate value: {0}")]
    Conflict(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. } => StoreError::Decode(err.to_string()),
            sqlx::Error::Database(ref db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                let constraint = db_err.constraint().unwrap_or("unknown");
                StoreError::Conflict(format!("violates unique constraint {constraint}"))
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Query(msg) => CoreError::Persistence(msg),
            StoreError::Decode(msg) => CoreError::Decode(msg),
            StoreError::Conflict(msg) => CoreError::Conflict(msg),
        }
    }
}

/// Document-store style access to items, categories and the grocery list.
///
/// Implementations are responsible for isolating concurrent writes.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Persist a new item and return its generated id.
    async fn insert_item(&self, item: &NewItem) -> Result<DbId, StoreError>;

    /// Delete an item, returning how many records were removed (0 or 1).
    async fn delete_item(&self, id: DbId) -> Result<u64, StoreError>;

    async fn find_item(&self, id: DbId) -> Result<Option<Item>, StoreError>;

    /// Items matching every condition of `query`, sorted and limited.
    async fn find_items(&self, query: &ItemQuery) -> Result<Vec<Item>, StoreError>;

    /// Replace the stored record with the same id. Returns `false` if none exists.
    async fn replace_item(&self, item: &Item) -> Result<bool, StoreError>;

    async fn insert_category(&self, input: &CreateCategory) -> Result<Category, StoreError>;

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Atomically swap the grocery list for `entries`, skipping entries
    /// whose item has since been deleted.
    async fn replace_grocery_list(&self, entries: &[GroceryEntry]) -> Result<(), StoreError>;

    async fn grocery_list(&self) -> Result<Vec<GroceryEntry>, StoreError>;
}
