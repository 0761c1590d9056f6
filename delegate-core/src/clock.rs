//! Tick source for the simulator and the dashboard's timed redirect.
//!
//! Time is a monotonic `Duration` since some origin, so tests can drive
//! everything with `ManualClock` instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Monotonic time since the clock's origin.
    fn elapsed(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

/// Turns clock time into a count of due ticks at a fixed interval.
#[derive(Debug, Clone)]
pub struct Ticker<C: Clock> {
    clock: C,
    interval: Duration,
    last: Duration,
}

impl<C: Clock> Ticker<C> {
    /// `interval` must be non-zero.
    pub fn new(clock: C, interval: Duration) -> Self {
        let last = clock.elapsed();
        Self {
            clock,
            interval: interval.max(Duration::from_millis(1)),
            last,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks that elapsed since the previous call. Leftover time carries over.
    pub fn due(&mut self) -> u32 {
        let now = self.clock.elapsed();
        let since = now.saturating_sub(self.last);
        let n = (since.as_nanos() / self.interval.as_nanos()).min(u32::MAX as u128) as u32;
        self.last += self.interval * n;
        n
    }

    /// How long until the next tick is due.
    pub fn until_next(&self) -> Duration {
        let since = self.clock.elapsed().saturating_sub(self.last);
        self.interval.saturating_sub(since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        a.advance(Duration::from_millis(1500));
        assert_eq!(b.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn ticker_counts_whole_intervals_and_carries_remainder() {
        let clock = ManualClock::new();
        let mut t = Ticker::new(clock.clone(), Duration::from_secs(2));
        assert_eq!(t.due(), 0);

        clock.advance(Duration::from_millis(4500));
        assert_eq!(t.due(), 2);
        assert_eq!(t.until_next(), Duration::from_millis(1500));

        clock.advance(Duration::from_millis(1500));
        assert_eq!(t.due(), 1);
        assert_eq!(t.due(), 0);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let clock = ManualClock::new();
        let mut t = Ticker::new(clock.clone(), Duration::ZERO);
        clock.advance(Duration::from_millis(3));
        assert_eq!(t.due(), 3);
    }
}
