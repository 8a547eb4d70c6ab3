//! Handlers for category metadata.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use larder_db::models::category::CreateCategory;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::extract::JsonBody;
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.store.list_categories().await?;

    Ok(Json(categories))
}

/// POST /addcategory
///
/// Duplicate names are rejected with 409.
pub async fn add_category(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = state.store.insert_category(&input).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Category added");

    Ok((StatusCode::CREATED, Json(category)))
}
