//! Handlers for the grocery list.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use larder_core::error::CoreError;

use crate::error::AppResult;
use crate::response::RefreshResponse;
use crate::state::AppState;

/// GET /grocerylist
///
/// The list as of the last refresh.
pub async fn grocery_list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = state.store.grocery_list().await?;

    Ok(Json(entries))
}

/// GET /forcelist
///
/// Refresh the grocery list now. Nothing is queued if a refresh is already
/// running.
pub async fn force_refresh(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let Some(entries) = state.grocery_job.run_once().await? else {
        return Err(CoreError::Conflict("grocery list refresh already in progress".into()).into());
    };

    Ok(Json(RefreshResponse {
        message: "grocery list refreshed",
        entries,
    }))
}
