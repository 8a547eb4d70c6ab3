//! Merge rules for partial item updates.
//!
//! A patch field only replaces the stored value when it carries something:
//! empty text, a zero quantity and a missing or epoch expiry all mean
//! "leave the field alone", never "clear it".

use crate::naming::normalize_item_name;
use crate::types::{Timestamp, EPOCH};

/// Overwrite `current` with `incoming` when the incoming text is non-empty.
///
/// Returns `true` if the field changed.
pub fn merge_text(current: &mut String, incoming: Option<&str>) -> bool {
    match incoming {
        Some(value) if !value.is_empty() && value != current.as_str() => {
            *current = value.to_string();
            true
        }
        _ => false,
    }
}

/// Like [`merge_text`], normalizing the incoming name first.
pub fn merge_name(current: &mut String, incoming: Option<&str>) -> bool {
    let normalized = incoming.map(normalize_item_name);
    merge_text(current, normalized.as_deref())
}

/// Overwrite `current` when the incoming quantity is non-zero.
pub fn merge_quantity(current: &mut f64, incoming: Option<f64>) -> bool {
    match incoming {
        Some(value) if value != 0.0 && value != *current => {
            *current = value;
            true
        }
        _ => false,
    }
}

/// Overwrite `current` when the incoming expiry is set and after the epoch.
pub fn merge_expiry(current: &mut Option<Timestamp>, incoming: Option<Timestamp>) -> bool {
    match incoming {
        Some(value) if value > EPOCH && Some(value) != *current => {
            *current = Some(value);
            true
        }
        _ => false,
    }
}
