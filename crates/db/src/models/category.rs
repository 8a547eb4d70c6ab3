//! Category metadata with per-category thresholds.
//!
//! These rows are stored and listed only; item status is still derived from
//! the startup [`ThresholdTable`](larder_core::status::ThresholdTable).

use larder_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub low_threshold: f64,
    pub ok_threshold: f64,
    pub created_at: Timestamp,
}

/// Request body for `POST /addcategory`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_threshold_order"))]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "low_threshold must not be negative"))]
    pub low_threshold: f64,
    #[validate(range(min = 0.0, message = "ok_threshold must not be negative"))]
    pub ok_threshold: f64,
}

fn validate_threshold_order(input: &CreateCategory) -> Result<(), ValidationError> {
    if input.low_threshold > input.ok_threshold {
        let mut err = ValidationError::new("threshold_order");
        err.message = Some("low_threshold must not exceed ok_threshold".into());
        return Err(err);
    }
    Ok(())
}
