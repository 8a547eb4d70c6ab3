//! Stock-level status derived from per-category quantity thresholds.
//!
//! The [`ThresholdTable`] is built once at startup and shared read-only by
//! every request handler. [`classify`] is the only place a [`Status`] is
//! computed.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Quantities at or above `threshold * HIGH_MULTIPLIER` are classified HIGH.
pub const HIGH_MULTIPLIER: f64 = 1.3;

/// Built-in thresholds used when `CATEGORY_THRESHOLDS` is not configured.
pub const DEFAULT_THRESHOLDS: &[(&str, f64)] = &[
    ("nuts", 0.5),
    ("dals", 1.0),
    ("condiments", 0.2),
    ("spices", 0.1),
    ("fruits", 2.0),
    ("snacks", 0.3),
    ("oils", 0.3),
    ("basic pantry items", 1.0),
];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Stock-level classification of an item. Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i16", try_from = "i16")]
pub enum Status {
    #[default]
    Low = 0,
    Ok = 1,
    High = 2,
}

impl Status {
    /// Integer code stored in the `items.status` column.
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Low => "low",
            Status::Ok => "ok",
            Status::High => "high",
        }
    }
}

impl From<Status> for i16 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl TryFrom<i16> for Status {
    type Error = CoreError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Low),
            1 => Ok(Status::Ok),
            2 => Ok(Status::High),
            other => Err(CoreError::Decode(format!("unknown status code {other}"))),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Threshold table
// ---------------------------------------------------------------------------

/// Category name -> quantity threshold. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    thresholds: HashMap<String, f64>,
}

impl ThresholdTable {
    pub fn new(thresholds: HashMap<String, f64>) -> Self {
        Self { thresholds }
    }

    /// Parse a `name=value` list separated by commas, e.g.
    /// `"nuts=0.5,basic pantry items=1.0"`.
    ///
    /// Category names keep their inner spaces; surrounding whitespace is
    /// trimmed. Thresholds must be finite and non-negative.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut thresholds = HashMap::new();

        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                CoreError::Validation(format!("threshold entry {pair:?} is not name=value"))
            })?;

            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::Validation(format!(
                    "threshold entry {pair:?} has an empty category"
                )));
            }

            let value: f64 = value.trim().parse().map_err(|_| {
                CoreError::Validation(format!("threshold for {name:?} is not a number"))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Validation(format!(
                    "threshold for {name:?} must be a non-negative number, got {value}"
                )));
            }

            thresholds.insert(name.to_string(), value);
        }

        Ok(Self { thresholds })
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.thresholds.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_THRESHOLDS
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Derive the stock status of `quantity` units of `category`.
///
/// Categories without a threshold are left at `current`.
///
/// # Examples
///
/// ```
/// use larder_core::status::{classify, Status, ThresholdTable};
///
/// let table = ThresholdTable::default();
/// assert_eq!(classify(1.0, "dals", &table, Status::Low), Status::Ok);
/// assert_eq!(classify(9.0, "unknown", &table, Status::Low), Status::Low);
/// ```
pub fn classify(
    quantity: f64,
    category: &str,
    thresholds: &ThresholdTable,
    current: Status,
) -> Status {
    let Some(threshold) = thresholds.get(category) else {
        return current;
    };

    if quantity >= threshold * HIGH_MULTIPLIER {
        Status::High
    } else if quantity >= threshold {
        Status::Ok
    } else {
        Status::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ThresholdTable {
        ThresholdTable::default()
    }

    #[test]
    fn at_threshold_is_ok() {
        assert_eq!(classify(1.0, "dals", &table(), Status::Low), Status::Ok);
        assert_eq!(classify(0.5, "nuts", &table(), Status::Low), Status::Ok);
    }

    #[test]
    fn at_high_boundary_is_high() {
        let t = table().get("fruits").unwrap();
        assert_eq!(classify(t * HIGH_MULTIPLIER, "fruits", &table(), Status::Low), Status::High);
    }

    #[test]
    fn just_below_threshold_is_low() {
        assert_eq!(classify(0.999_999, "dals", &table(), Status::High), Status::Low);
    }

    #[test]
    fn between_threshold_and_high_is_ok() {
        assert_eq!(classify(2.4, "fruits", &table(), Status::Low), Status::Ok);
    }

    #[test]
    fn unknown_category_keeps_current_status() {
        for q in [0.0, 1.0, 1_000.0] {
            assert_eq!(classify(q, "cheese", &table(), Status::Low), Status::Low);
            assert_eq!(classify(q, "cheese", &table(), Status::High), Status::High);
        }
    }

    #[test]
    fn category_lookup_is_exact() {
        assert_eq!(classify(5.0, "Nuts", &table(), Status::Low), Status::Low);
    }

    #[test]
    fn classification_is_monotonic_in_quantity() {
        let table = table();
        for (category, _) in DEFAULT_THRESHOLDS {
            let mut previous = Status::Low;
            for step in 0..400 {
                let q = f64::from(step) * 0.01;
                let status = classify(q, category, &table, Status::Low);
                assert!(status >= previous, "{category}: {q} dropped to {status}");
                previous = status;
            }
        }
    }

    #[test]
    fn parse_accepts_names_with_spaces() {
        let table = ThresholdTable::parse(" nuts=0.5 , basic pantry items = 1.0 ,").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("basic pantry items"), Some(1.0));
    }

    #[test]
    fn parse_rejects_bad_entries() {
        assert!(ThresholdTable::parse("nuts").is_err());
        assert!(ThresholdTable::parse("=1.0").is_err());
        assert!(ThresholdTable::parse("nuts=lots").is_err());
        assert!(ThresholdTable::parse("nuts=-1").is_err());
    }

    #[test]
    fn status_serializes_as_integer_code() {
        assert_eq!(serde_json::to_string(&Status::High).unwrap(), "2");
        let status: Status = serde_json::from_str("1").unwrap();
        assert_eq!(status, Status::Ok);
        assert!(serde_json::from_str::<Status>("7").is_err());
    }
}
