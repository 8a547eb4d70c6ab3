//! Item query builder.
//!
//! Turns search parameters into a store-agnostic [`ItemQuery`]: a list of
//! conditions that must all hold, a sort order and an optional limit. The
//! PostgreSQL store renders it to SQL; the in-memory store evaluates it
//! directly.

use chrono::Duration;
use serde::Deserialize;

use crate::error::CoreError;
use crate::status::Status;
use crate::types::{Timestamp, EPOCH};

/// Maximum number of items returned by a general search.
pub const SEARCH_LIMIT: i64 = 20;

/// Items expiring within this many days of now are "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 3;

/// Default and maximum `limit` for the expiring-soon listing.
pub const DEFAULT_EXPIRING_LIMIT: i64 = 10;
pub const MAX_EXPIRING_LIMIT: i64 = 10;

/// Filter value meaning "do not filter on this field".
pub const MATCH_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Query model
// ---------------------------------------------------------------------------

/// Text fields that support pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Category,
    Location,
}

impl TextField {
    pub fn column(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Category => "category",
            TextField::Location => "location",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field matches `pattern` as an unanchored, case-sensitive regex.
    Matches { field: TextField, pattern: String },
    /// The stored status equals the given one.
    StatusIs(Status),
    /// `after < expiry <= until`. Items without an expiry never match.
    ExpiresWithin { after: Timestamp, until: Timestamp },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// No explicit ordering; the store returns items in insertion order.
    #[default]
    Storage,
    /// Oldest first by `created_at`.
    CreatedAsc,
    /// Most recent first by `created_at`.
    CreatedDesc,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemQuery {
    pub conditions: Vec<Condition>,
    pub sort: SortOrder,
    pub limit: Option<i64>,
}

/// Query parameters accepted by `GET /search`.
///
/// Absent parameters behave like empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub recent: String,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl ItemQuery {
    /// General search: name/category/location patterns, recency ordering,
    /// at most [`SEARCH_LIMIT`] results.
    pub fn search(criteria: &SearchCriteria) -> Self {
        let mut conditions = Vec::new();

        if !criteria.query.is_empty() {
            conditions.push(Condition::Matches {
                field: TextField::Name,
                pattern: criteria.query.clone(),
            });
        }
        if is_filter_value(&criteria.category) {
            conditions.push(Condition::Matches {
                field: TextField::Category,
                pattern: criteria.category.clone(),
            });
        }
        if is_filter_value(&criteria.location) {
            conditions.push(Condition::Matches {
                field: TextField::Location,
                pattern: criteria.location.clone(),
            });
        }

        let sort = if criteria.recent == "true" {
            SortOrder::CreatedDesc
        } else {
            SortOrder::CreatedAsc
        };

        Self {
            conditions,
            sort,
            limit: Some(SEARCH_LIMIT),
        }
    }

    /// Items with an expiry in `(epoch, now + EXPIRY_WINDOW_DAYS]`, in
    /// storage order.
    pub fn expiring_soon(now: Timestamp, limit: i64) -> Self {
        Self {
            conditions: vec![Condition::ExpiresWithin {
                after: EPOCH,
                until: now + Duration::days(EXPIRY_WINDOW_DAYS),
            }],
            sort: SortOrder::Storage,
            limit: Some(limit),
        }
    }

    /// Every item currently classified LOW, oldest first.
    pub fn low_stock() -> Self {
        Self {
            conditions: vec![Condition::StatusIs(Status::Low)],
            sort: SortOrder::CreatedAsc,
            limit: None,
        }
    }
}

fn is_filter_value(value: &str) -> bool {
    !value.is_empty() && value != MATCH_ALL
}

/// Validate the raw `limit` parameter of the expiring-soon listing.
///
/// Absent means [`DEFAULT_EXPIRING_LIMIT`]. Anything that is not an integer
/// in `1..=MAX_EXPIRING_LIMIT` is rejected.
pub fn validate_expiring_limit(raw: Option<&str>) -> Result<i64, CoreError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_EXPIRING_LIMIT);
    };

    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("limit must be an integer, got {raw:?}")))?;

    if !(1..=MAX_EXPIRING_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_EXPIRING_LIMIT}, got {limit}"
        )));
    }

    Ok(limit)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn criteria(query: &str, category: &str, location: &str, recent: &str) -> SearchCriteria {
        SearchCriteria {
            query: query.into(),
            category: category.into(),
            location: location.into(),
            recent: recent.into(),
        }
    }

    #[test]
    fn empty_search_has_no_conditions() {
        let q = ItemQuery::search(&SearchCriteria::default());
        assert!(q.conditions.is_empty());
        assert_eq!(q.sort, SortOrder::CreatedAsc);
        assert_eq!(q.limit, Some(SEARCH_LIMIT));
    }

    #[test]
    fn all_sentinel_skips_category_and_location() {
        let q = ItemQuery::search(&criteria("rice", "all", "all", ""));
        assert_eq!(
            q.conditions,
            vec![Condition::Matches {
                field: TextField::Name,
                pattern: "rice".into(),
            }]
        );
    }

    #[test]
    fn every_filter_becomes_a_condition() {
        let q = ItemQuery::search(&criteria("Ri", "dals", "pantry", "true"));
        assert_eq!(q.conditions.len(), 3);
        assert!(q.conditions.contains(&Condition::Matches {
            field: TextField::Location,
            pattern: "pantry".into(),
        }));
        assert_eq!(q.sort, SortOrder::CreatedDesc);
    }

    #[test]
    fn only_literal_true_sorts_by_recency() {
        for flag in ["", "false", "TRUE", "1", "yes"] {
            let q = ItemQuery::search(&criteria("", "all", "all", flag));
            assert_eq!(q.sort, SortOrder::CreatedAsc, "recent={flag:?}");
        }
    }

    #[test]
    fn expiring_window_spans_three_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let q = ItemQuery::expiring_soon(now, 5);
        assert_eq!(
            q.conditions,
            vec![Condition::ExpiresWithin {
                after: EPOCH,
                until: Utc.with_ymd_and_hms(2026, 10, 21, 8, 0, 0).unwrap(),
            }]
        );
        assert_eq!(q.sort, SortOrder::Storage);
        assert_eq!(q.limit, Some(5));
    }

    #[test]
    fn low_stock_filters_on_status() {
        let q = ItemQuery::low_stock();
        assert_eq!(q.conditions, vec![Condition::StatusIs(Status::Low)]);
        assert_eq!(q.limit, None);
    }

    #[test]
    fn expiring_limit_defaults_to_ten() {
        assert_eq!(validate_expiring_limit(None).unwrap(), 10);
        assert_eq!(validate_expiring_limit(Some("3")).unwrap(), 3);
        assert_eq!(validate_expiring_limit(Some("10")).unwrap(), 10);
    }

    #[test]
    fn expiring_limit_rejects_out_of_range_and_garbage() {
        for raw in ["15", "11", "0", "-2", "ten", "", "2.5"] {
            assert!(
                matches!(validate_expiring_limit(Some(raw)), Err(CoreError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
