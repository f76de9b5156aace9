use std::time::Instant;

/// Source of the per-tick timestamp handed to the engine.
pub trait GestureClock {
    /// Milliseconds since an arbitrary, fixed origin. Must never go backwards.
    fn now_ms(&mut self) -> u64;
}

/// Wall-clock driver anchored at construction time.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl GestureClock for MonotonicClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis().min(u64::MAX as u128) as u64
    }
}

/// Clock advanced explicitly by the caller; used by replays and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub const fn starting_at(now_ms: u64) -> Self {
        Self { now_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    pub fn set(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl GestureClock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_moves_backwards() {
        let mut clock = ManualClock::starting_at(100);
        clock.advance(16);
        assert_eq!(clock.now_ms(), 116);
        clock.set(50);
        assert_eq!(clock.now_ms(), 116);
        clock.set(200);
        assert_eq!(clock.now_ms(), 200);
    }

    #[test]
    fn monotonic_clock_never_decreases() {
        let mut clock = MonotonicClock::new();
        let mut last = clock.now_ms();
        for _ in 0..1_000 {
            let now = clock.now_ms();
            assert!(now >= last, "{now} < {last}");
            last = now;
        }
    }
}
