use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The zero timestamp. Expiries at or before it count as "no expiry".
pub const EPOCH: Timestamp = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;

/// Parse a path segment into a [`DbId`].
///
/// Only positive integers are well-formed identifiers.
pub fn parse_db_id(raw: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("invalid item ID: {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(parse_db_id("42").unwrap(), 42);
        assert_eq!(parse_db_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "abc", "0", "-3", "65f0c0ffee", "1.5"] {
            assert!(
                matches!(parse_db_id(raw), Err(CoreError::Validation(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
