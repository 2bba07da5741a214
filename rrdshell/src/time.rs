//! Timestamp conversion for engine command lines.

use std::time::{SystemTime, UNIX_EPOCH};

/// Converts a [`SystemTime`] to whole seconds since the Unix epoch.
///
/// The sub-second part is discarded by flooring, never rounded: an instant
/// 999ms past a second maps to that second, and an instant 1ms before the
/// epoch maps to `-1`. Values outside the `i64` range saturate.
///
/// # Examples
///
/// ```rust
/// use std::time::{Duration, UNIX_EPOCH};
/// use rrdshell::unix_time;
///
/// let t = UNIX_EPOCH + Duration::from_millis(1_318_874_398_806);
/// assert_eq!(unix_time(t), 1_318_874_398);
/// ```
pub fn unix_time(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            if before.subsec_nanos() > 0 {
                // Flooring a negative instant moves away from zero.
                secs.saturating_neg().saturating_sub(1)
            } else {
                secs.saturating_neg()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_truncates_milliseconds() {
        let t = UNIX_EPOCH + Duration::from_millis(1_318_874_398_806);
        assert_eq!(unix_time(t), 1_318_874_398);
    }

    #[test]
    fn test_never_rounds_up() {
        let t = UNIX_EPOCH + Duration::from_nanos(1_364_374_210_999_999_999);
        assert_eq!(unix_time(t), 1_364_374_210);
    }

    #[test]
    fn test_whole_seconds_unchanged() {
        assert_eq!(unix_time(UNIX_EPOCH), 0);
        assert_eq!(unix_time(UNIX_EPOCH + Duration::from_secs(42)), 42);
    }

    #[test]
    fn test_before_epoch_floors() {
        assert_eq!(unix_time(UNIX_EPOCH - Duration::from_millis(1)), -1);
        assert_eq!(unix_time(UNIX_EPOCH - Duration::from_secs(2)), -2);
        assert_eq!(unix_time(UNIX_EPOCH - Duration::from_millis(2_500)), -3);
    }
}
