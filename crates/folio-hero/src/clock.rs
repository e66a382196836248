use std::time::{Duration, Instant};

/// Seconds since mount, never decreasing even if the host hands back an
/// earlier timestamp.
#[derive(Debug, Copy, Clone)]
pub struct ElapsedClock {
    start: Instant,
    last: Duration,
}

impl ElapsedClock {
    pub fn start(now: Instant) -> Self {
        Self { start: now, last: Duration::ZERO }
    }

    /// Elapsed time at `now`.
    pub fn elapsed(&mut self, now: Instant) -> Duration {
        self.last = self.last.max(now.saturating_duration_since(self.start));
        self.last
    }

    pub fn elapsed_secs(&mut self, now: Instant) -> f32 {
        self.elapsed(now).as_secs_f32()
    }

    /// Last value returned by [`elapsed`](Self::elapsed).
    pub fn last(&self) -> Duration {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_zero() {
        let t0 = Instant::now();
        let mut clock = ElapsedClock::start(t0);
        assert_eq!(clock.elapsed(t0), Duration::ZERO);
    }

    #[test]
    fn measures_from_start() {
        let t0 = Instant::now();
        let mut clock = ElapsedClock::start(t0);
        assert_eq!(clock.elapsed(t0 + Duration::from_millis(1500)), Duration::from_millis(1500));
        assert!((clock.elapsed_secs(t0 + Duration::from_secs(2)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn earlier_timestamp_does_not_rewind() {
        let t0 = Instant::now();
        let mut clock = ElapsedClock::start(t0);
        clock.elapsed(t0 + Duration::from_secs(3));
        assert_eq!(clock.elapsed(t0 + Duration::from_secs(1)), Duration::from_secs(3));
    }

    proptest! {
        #[test]
        fn elapsed_is_non_decreasing(offsets in proptest::collection::vec(0u64..10_000, 1..64)) {
            let t0 = Instant::now();
            let mut clock = ElapsedClock::start(t0);
            let mut prev = Duration::ZERO;
            for ms in offsets {
                let e = clock.elapsed(t0 + Duration::from_millis(ms));
                prop_assert!(e >= prev);
                prev = e;
            }
        }
    }
}
