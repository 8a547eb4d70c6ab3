//! Response bodies for the item lifecycle endpoints.
//!
//! Field names follow the public contract (`insertedID`, `itemID`) rather
//! than Rust naming.

use larder_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body of a successful `POST /insert`.
#[derive(Debug, Serialize)]
pub struct InsertedResponse {
    pub message: &'static str,
    #[serde(rename = "insertedID")]
    pub inserted_id: DbId,
}

/// Body of a successful delete or update.
#[derive(Debug, Serialize)]
pub struct ItemIdResponse {
    pub message: &'static str,
    #[serde(rename = "itemID")]
    pub item_id: DbId,
}

/// Body of a successful `GET /forcelist`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub entries: usize,
}
