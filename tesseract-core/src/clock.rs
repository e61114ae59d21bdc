//! Frame clocks
//!
//! The animation driver never reads the wall clock itself; a [`FrameClock`]
//! supplies monotonic timestamps instead:
//!
//! - `MonotonicClock`: real time since the clock was created
//! - `ManualClock`: stepped explicitly, for tests and offline frame export

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of monotonic frame timestamps
pub trait FrameClock: Send + Sync {
    /// Time since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    /// Clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock starting at `start`
    pub fn at(start: Duration) -> Self {
        let clock = Self::new();
        clock.set(start);
        clock
    }

    /// Jump to an absolute time, saturating at `u64::MAX` nanoseconds
    pub fn set(&self, t: Duration) {
        self.nanos.store(saturating_nanos(t), Ordering::SeqCst);
    }

    /// Move forward by `step`; the clock sticks at its maximum
    pub fn advance(&self, step: Duration) {
        let step = saturating_nanos(step);
        // The closure always returns Some, so this never fails
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_add(step)));
    }

    /// Step that yields `fps` frames per second. Rates too small to
    /// represent, or not positive, give `Duration::MAX`.
    pub fn frame_step(fps: f64) -> Duration {
        Duration::try_from_secs_f64(1.0 / fps).unwrap_or(Duration::MAX)
    }
}

fn saturating_nanos(t: Duration) -> u64 {
    u64::try_from(t.as_nanos()).unwrap_or(u64::MAX)
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}
