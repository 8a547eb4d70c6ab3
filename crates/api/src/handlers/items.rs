//! Handlers for the item lifecycle: insert, delete, partial update, search
//! and the derived listings (expiring soon, low stock).

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use larder_core::error::CoreError;
use larder_core::item_query::{validate_expiring_limit, ItemQuery, SearchCriteria};
use larder_db::models::item::{CreateItem, ItemPatch};
use larder_db::store::StoreError;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::extract::{ItemIdPath, JsonBody};
use crate::response::{InsertedResponse, ItemIdResponse};
use crate::state::AppState;

/// Raw query parameters of `GET /expiringsoon`. `limit` is validated by hand
/// so a bad value is reported as a validation error.
#[derive(Debug, Deserialize)]
pub struct ExpiringParams {
    pub limit: Option<String>,
}

/// POST /insert
///
/// Normalize the name, classify the status from the threshold table, stamp
/// the creation time and persist.
pub async fn insert_item(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let item = input.into_new_item(&state.thresholds, Utc::now());
    let id = state.store.insert_item(&item).await?;

    tracing::info!(item_id = id, status = %item.status, category = %item.category, "Item inserted");

    Ok(Json(InsertedResponse {
        message: "item inserted successfully",
        inserted_id: id,
    }))
}

/// DELETE /delete/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> AppResult<impl IntoResponse> {
    let removed = state.store.delete_item(id).await?;

    if removed == 0 {
        return Err(CoreError::NotFound { entity: "Item", id }.into());
    }

    tracing::info!(item_id = id, "Item deleted");

    Ok(Json(ItemIdResponse {
        message: "Item deleted successfully",
        item_id: id,
    }))
}

/// PATCH /updateitem/{id}
///
/// Merge the non-empty fields of the patch into the stored item and replace
/// it. The status is not recomputed.
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    JsonBody(patch): JsonBody<ItemPatch>,
) -> AppResult<impl IntoResponse> {
    patch.validate()?;

    let not_found = || CoreError::NotFound { entity: "Item", id };

    let mut item = state.store.find_item(id).await?.ok_or_else(not_found)?;

    if item.apply_patch(&patch) {
        // The item may have been deleted since it was read.
        if !state.store.replace_item(&item).await? {
            return Err(not_found().into());
        }
        tracing::info!(item_id = id, "Item updated");
    } else {
        tracing::debug!(item_id = id, "Item update carried no changes");
    }

    Ok(Json(ItemIdResponse {
        message: "item updated successfully",
        item_id: id,
    }))
}

/// GET /search?query=&category=&location=&recent=
///
/// Returns at most 20 items. A failing store query is reported as an empty
/// result; records that cannot be decoded are a server error.
pub async fn search_items(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> AppResult<impl IntoResponse> {
    let query = ItemQuery::search(&criteria);

    let items = match state.store.find_items(&query).await {
        Ok(items) => items,
        Err(StoreError::Query(msg)) => {
            tracing::warn!(error = %msg, "Search query failed, returning no items");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    tracing::debug!(count = items.len(), "Search completed");

    Ok(Json(items))
}

/// GET /expiringsoon?limit=
///
/// Items expiring within the next three days. `limit` defaults to 10 and may
/// not exceed it.
pub async fn expiring_soon(
    State(state): State<AppState>,
    Query(params): Query<ExpiringParams>,
) -> AppResult<impl IntoResponse> {
    let limit = validate_expiring_limit(params.limit.as_deref())?;

    let items = state
        .store
        .find_items(&ItemQuery::expiring_soon(Utc::now(), limit))
        .await?;

    Ok(Json(items))
}

/// GET /lowitems
pub async fn low_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.store.find_items(&ItemQuery::low_stock()).await?;

    Ok(Json(items))
}
