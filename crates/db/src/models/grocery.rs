//! Grocery list snapshot rows.

use larder_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::item::Item;

/// One line of the grocery list, copied from a low-stock item.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct GroceryEntry {
    pub item_id: DbId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub location: String,
    pub generated_at: Timestamp,
}

impl GroceryEntry {
    pub fn from_item(item: &Item, generated_at: Timestamp) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            category: item.category.clone(),
            location: item.location.clone(),
            generated_at,
        }
    }
}
