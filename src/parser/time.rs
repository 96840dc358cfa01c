//! Time-of-day normalization

use super::LineError;

/// Convert an `hh:mm:ss` string to seconds since midnight.
///
/// Each component is trimmed before parsing, and components beyond the third
/// are ignored. A shifted fixed-width field such as `"0:00:00 "` therefore
/// still converts, which is how single-digit days end up with silently wrong
/// times instead of an error.
pub fn to_seconds(time: &str) -> Result<i64, LineError> {
    let mut parts = time.split(':');
    let mut next = || -> Result<i64, LineError> {
        parts
            .next()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .ok_or_else(|| LineError::InvalidTime(time.to_string()))
    };

    let hours = next()?;
    let minutes = next()?;
    let seconds = next()?;

    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| LineError::InvalidTime(time.to_string()))
}
