//! Clock abstraction consumed by [`V7Generator`](crate::V7Generator).

/// A trait that defines the minimum system clock interface for
/// [`V7Generator`](crate::V7Generator).
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// A clock set before the Unix epoch reads as zero, which the generator then treats like any other
/// clock rollback.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::{StdSystemTime, TimeSource};

    #[test]
    fn reads_a_plausible_wall_clock() {
        let now = StdSystemTime.unix_ts_ms();
        // 2024-01-01 and 2100-01-01
        assert!(now > 1_704_067_200_000);
        assert!(now < 4_102_444_800_000);
    }
}
