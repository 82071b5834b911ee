//! Trailing 24-hour admission window.

use chrono::{DateTime, Duration, FixedOffset};

/// Width of the trailing window.
pub const WINDOW_HOURS: i64 = 24;

/// Admit an instant iff it is known, not after `now`, and at most 24h old.
pub fn admit(instant: Option<DateTime<FixedOffset>>, now: DateTime<FixedOffset>) -> bool {
    match instant {
        Some(instant) => instant <= now && now - instant <= Duration::hours(WINDOW_HOURS),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hk_offset;
    use chrono::TimeZone;

    fn hk(d: u32, h: u32) -> DateTime<FixedOffset> {
        hk_offset().with_ymd_and_hms(2025, 8, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_admits_within_window() {
        assert!(admit(Some(hk(23, 13)), hk(24, 12)));
    }

    #[test]
    fn test_rejects_older_than_window() {
        assert!(!admit(Some(hk(23, 11)), hk(24, 12)));
    }

    #[test]
    fn test_boundaries_inclusive() {
        assert!(admit(Some(hk(23, 12)), hk(24, 12)));
        assert!(admit(Some(hk(24, 12)), hk(24, 12)));
    }

    #[test]
    fn test_rejects_future_and_missing() {
        assert!(!admit(Some(hk(24, 13)), hk(24, 12)));
        assert!(!admit(None, hk(24, 12)));
    }
}
