//! Inventory item model and DTOs.

use larder_core::naming::normalize_item_name;
use larder_core::patch::{merge_expiry, merge_name, merge_quantity, merge_text};
use larder_core::status::{classify, Status, ThresholdTable};
use larder_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// An inventory item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub category: String,
    pub expiry: Option<Timestamp>,
    pub status: Status,
    pub created_at: Timestamp,
}

/// A row from the `items` table, before the status code is decoded.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ItemRow {
    pub id: DbId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub category: String,
    pub expiry: Option<Timestamp>,
    pub status: i16,
    pub created_at: Timestamp,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let status = Status::try_from(row.status)
            .map_err(|e| StoreError::Decode(format!("item {}: {e}", row.id)))?;

        Ok(Item {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            location: row.location,
            category: row.category,
            expiry: row.expiry,
            status,
            created_at: row.created_at,
        })
    }
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        ItemRow {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            location: item.location.clone(),
            category: item.category.clone(),
            expiry: item.expiry,
            status: item.status.code(),
            created_at: item.created_at,
        }
    }
}

impl Item {
    /// Apply a partial update in place. Status is left untouched.
    ///
    /// Returns `true` if any field changed.
    pub fn apply_patch(&mut self, patch: &ItemPatch) -> bool {
        // Evaluate every merge; `||` would short-circuit.
        let changed = [
            merge_name(&mut self.name, patch.name.as_deref()),
            merge_quantity(&mut self.quantity, patch.quantity),
            merge_text(&mut self.unit, patch.unit.as_deref()),
            merge_text(&mut self.location, patch.location.as_deref()),
            merge_text(&mut self.category, patch.category.as_deref()),
            merge_expiry(&mut self.expiry, patch.expiry),
        ];
        changed.contains(&true)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /insert`.
///
/// `id`, `status` and `created_at` are server-assigned; if a client sends
/// them they are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "quantity must not be negative"))]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub expiry: Option<Timestamp>,
}

impl CreateItem {
    /// Normalize the name, classify the status and stamp the creation time.
    pub fn into_new_item(self, thresholds: &ThresholdTable, now: Timestamp) -> NewItem {
        let status = classify(self.quantity, &self.category, thresholds, Status::default());

        NewItem {
            name: normalize_item_name(&self.name),
            quantity: self.quantity,
            unit: self.unit,
            location: self.location,
            category: self.category,
            expiry: self.expiry,
            status,
            created_at: now,
        }
    }
}

/// A fully prepared item ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub category: String,
    pub expiry: Option<Timestamp>,
    pub status: Status,
    pub created_at: Timestamp,
}

impl NewItem {
    pub fn into_item(self, id: DbId) -> Item {
        Item {
            id,
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
            location: self.location,
            category: self.category,
            expiry: self.expiry,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Request body for `PATCH /updateitem/{id}`.
///
/// Empty strings, a zero quantity and a null expiry are treated as "no
/// change". A negative quantity is rejected.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ItemPatch {
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "quantity must not be negative"))]
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub expiry: Option<Timestamp>,
}
