//! Periodic regeneration of the grocery list.
//!
//! The list is rebuilt from every item whose stock status is Low. Refreshes
//! run on a fixed interval aligned to multiples of the interval since the
//! Unix epoch, and can also be forced from the API. At most one refresh is
//! in flight at a time; a trigger that arrives while one is running is
//! dropped.

use std::sync::Arc;

use chrono::Utc;
use larder_core::item_query::ItemQuery;
use larder_core::scheduling::next_aligned_run;
use larder_db::models::grocery::GroceryEntry;
use larder_db::store::{InventoryStore, StoreError};
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub struct GroceryListJob {
    store: Arc<dyn InventoryStore>,
    running: Mutex<()>,
}

impl GroceryListJob {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            running: Mutex::new(()),
        }
    }

    /// Rebuild the grocery list once.
    ///
    /// Returns `Ok(None)` without touching the store when another refresh
    /// holds the guard, otherwise the number of entries written.
    pub async fn run_once(&self) -> Result<Option<usize>, StoreError> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::debug!("Grocery list refresh already running, trigger dropped");
            return Ok(None);
        };

        let low_items = self.store.find_items(&ItemQuery::low_stock()).await?;
        let generated_at = Utc::now();
        let entries: Vec<GroceryEntry> = low_items
            .iter()
            .map(|item| GroceryEntry::from_item(item, generated_at))
            .collect();

        self.store.replace_grocery_list(&entries).await?;

        tracing::info!(entries = entries.len(), "Grocery list refreshed");
        Ok(Some(entries.len()))
    }

    /// Run the scheduled refresh loop until `cancel` is triggered.
    ///
    /// The first tick fires at the next epoch-aligned boundary after startup.
    /// Ticks missed while a refresh was slow are skipped, not replayed.
    pub async fn run(self: Arc<Self>, interval: chrono::Duration, cancel: CancellationToken) {
        let Ok(period) = interval.to_std() else {
            tracing::error!(%interval, "Grocery list job: interval must be positive");
            return;
        };

        let now = Utc::now();
        let first_run = next_aligned_run(now, interval);
        let delay = (first_run - now).to_std().unwrap_or_default();

        tracing::info!(
            interval_secs = period.as_secs(),
            first_run = %first_run,
            "Grocery list job started"
        );

        let mut ticker = tokio::time::interval_at(Instant::now() + delay, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Grocery list job stopping");
                    break;
                }
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            tracing::debug!(
                                "Grocery list job: previous refresh still running, tick skipped"
                            );
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Grocery list job: refresh failed");
                        }
                    }
                }
            }
        }
    }
}
