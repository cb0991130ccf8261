//! Wall-clock frame deltas with an upper bound per frame.

use std::time::Instant;

/// Measures the elapsed time between consecutive frames.
///
/// Each [`tick`](FrameClock::tick) returns the seconds since the previous
/// tick, clamped to `max_dt` so a stalled frame (debugger pause, window drag,
/// background tab) resumes with one bounded step instead of a catch-up jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    /// Creates a clock whose first tick measures from now.
    pub fn new(max_dt: f32) -> Self {
        Self::seeded_at(Instant::now(), max_dt)
    }

    /// Creates a clock whose first tick measures from `now`.
    pub fn seeded_at(now: Instant, max_dt: f32) -> Self {
        Self { last: now, max_dt }
    }

    /// Returns seconds elapsed since the previous tick, clamped to `max_dt`.
    ///
    /// A `now` earlier than the previous tick yields zero rather than going
    /// negative.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        if raw > self.max_dt {
            tracing::warn!("frame delta {:.3}s clamped to {:.3}s", raw, self.max_dt);
            return self.max_dt;
        }
        raw
    }

    /// Ticks against the current wall clock.
    pub fn tick_now(&mut self) -> f32 {
        self.tick(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tick_returns_elapsed_seconds() {
        let start = Instant::now();
        let mut clock = FrameClock::seeded_at(start, 0.25);
        let dt = clock.tick(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_consecutive_ticks_measure_between_calls() {
        let start = Instant::now();
        let mut clock = FrameClock::seeded_at(start, 0.25);
        clock.tick(start + Duration::from_millis(16));
        let dt = clock.tick(start + Duration::from_millis(33));
        assert!((dt - 0.017).abs() < 1e-6);
    }

    #[test]
    fn test_long_stall_clamps_to_ceiling() {
        let start = Instant::now();
        let mut clock = FrameClock::seeded_at(start, 0.25);
        assert_eq!(clock.tick(start + Duration::from_secs(3)), 0.25);
        // the clamped frame still advances the reference point
        let dt = clock.tick(start + Duration::from_secs(3) + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_earlier_timestamp_yields_zero() {
        let start = Instant::now();
        let mut clock = FrameClock::seeded_at(start + Duration::from_secs(5), 0.25);
        assert_eq!(clock.tick(start), 0.0);
    }
}
