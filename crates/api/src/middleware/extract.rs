//! Request extractors that reject with [`AppError`] instead of Axum's
//! plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use larder_core::types::{parse_db_id, DbId};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Item id taken from the `{id}` path segment.
///
/// Anything that is not a positive integer is rejected with a validation
/// error before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct ItemIdPath(pub DbId);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(ItemIdPath(parse_db_id(&raw)?))
    }
}

/// JSON request body. Malformed or mistyped payloads become a 400.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::BadRequest(format!("Invalid JSON data: {}", rejection.body_text()))
        })?;

        Ok(JsonBody(value))
    }
}
