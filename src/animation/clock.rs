//! Time sources for animated transforms.
//!
//! Animated transforms never read the clock themselves. The frame loop samples
//! a [`Clock`] once into a [`FrameTime`] and hands that single value to every
//! transform evaluated during the frame, so all animations of one frame agree
//! on the time.

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds elapsed since the animation epoch, sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameTime {
    pub elapsed_ms: u64,
}

impl FrameTime {
    pub const ZERO: Self = Self { elapsed_ms: 0 };

    pub fn from_millis(elapsed_ms: u64) -> Self {
        Self { elapsed_ms }
    }

    /// Fraction of a loop of `period_ms` completed at this time, in `[0, 1)`.
    ///
    /// A zero period never advances and always returns `0.0`. The modulo is
    /// taken on the integer milliseconds first so precision does not degrade
    /// over long runs.
    pub fn loop_fraction(&self, period_ms: u64) -> f32 {
        if period_ms == 0 {
            return 0.0;
        }
        let into_loop = self.elapsed_ms % period_ms;
        let fraction = (into_loop as f64 / period_ms as f64) as f32;
        // Very long periods can round up to exactly 1.0 in f32.
        fraction.min(1.0 - f32::EPSILON)
    }
}

pub trait Clock {
    fn elapsed_ms(&self) -> u64;

    fn frame_time(&self) -> FrameTime {
        FrameTime::from_millis(self.elapsed_ms())
    }
}

/// Wall clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Used for headless stepping and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
