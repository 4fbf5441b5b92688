//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if the duration
/// does not fit in nanoseconds.
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn durations_convert_to_seconds() {
        let secs = duration_to_seconds(chrono::Duration::milliseconds(1500)).unwrap();
        assert!((secs - 1.5).abs() < 1e-9);

        let secs = duration_to_seconds(chrono::Duration::seconds(-2)).unwrap();
        assert!((secs + 2.0).abs() < 1e-9);
    }
}
