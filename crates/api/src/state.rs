use std::sync::Arc;

use larder_core::status::ThresholdTable;
use larder_db::store::InventoryStore;

use crate::background::grocery_list::GroceryListJob;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and never mutated. Cheaply cloneable (everything
/// is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Item, category and grocery list persistence.
    pub store: Arc<dyn InventoryStore>,
    /// Category thresholds used to classify new items.
    pub thresholds: Arc<ThresholdTable>,
    pub config: Arc<ServerConfig>,
    /// Grocery list refresher, shared with the scheduled loop.
    pub grocery_job: Arc<GroceryListJob>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>, config: ServerConfig) -> Self {
        Self {
            thresholds: Arc::new(config.thresholds.clone()),
            grocery_job: Arc::new(GroceryListJob::new(Arc::clone(&store))),
            config: Arc::new(config),
            store,
        }
    }
}
