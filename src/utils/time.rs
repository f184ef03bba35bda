//! Duration helpers for log and span fields.

use std::time::Duration;

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_milliseconds() {
        assert_eq!(duration_millis(Duration::from_micros(1_999)), 1);
        assert_eq!(duration_millis(Duration::from_secs(3)), 3_000);
    }

    #[test]
    fn test_saturates_past_u64() {
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
    }
}
