//! Wall-clock alignment for recurring jobs.
//!
//! Recurring jobs fire on interval boundaries measured from the Unix epoch
//! (UTC), so a 12 hour job runs at 00:00 and 12:00 regardless of when the
//! process started.

use chrono::{DateTime, Duration};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default grocery list refresh interval in hours.
pub const DEFAULT_REFRESH_HOURS: u64 = 12;

/// Build a refresh interval from a whole number of hours.
pub fn refresh_interval(hours: u64) -> Result<Duration, CoreError> {
    if hours == 0 || hours > 24 * 7 {
        return Err(CoreError::Validation(format!(
            "refresh interval must be between 1 and 168 hours, got {hours}"
        )));
    }
    // Bounded above, so the cast cannot truncate.
    Ok(Duration::hours(hours as i64))
}

/// The first interval boundary strictly after `now`.
pub fn next_aligned_run(now: Timestamp, interval: Duration) -> Timestamp {
    let step = interval.num_seconds().max(1);
    let secs = now.timestamp();
    let next = (secs.div_euclid(step) + 1) * step;
    DateTime::from_timestamp(next, 0).unwrap_or(now + interval)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn aligns_to_next_twelve_hour_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let next = next_aligned_run(now, Duration::hours(12));
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap());
    }

    #[test]
    fn exact_boundary_schedules_the_following_one() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let next = next_aligned_run(now, Duration::hours(12));
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_out_of_range_intervals() {
        assert!(refresh_interval(0).is_err());
        assert!(refresh_interval(500).is_err());
        assert_eq!(refresh_interval(12).unwrap(), Duration::hours(12));
    }
}
