//! # Monotonic Clock
//!
//! The receiver state machine needs a monotonic microsecond clock to
//! measure inter-byte staleness (§5, §9 design notes). It is injected as a
//! trait so tests can drive staleness deterministically with a virtual
//! clock instead of sleeping in wall-clock time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic microsecond clock.
pub trait Clock: Send + Sync {
    /// Current time in microseconds since an arbitrary, clock-specific
    /// epoch. Only differences between two calls are meaningful.
    fn now_us(&self) -> u64;
}

/// Real wall-clock time, backed by `std::time::Instant`.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_us(&self) -> u64 {
        self.epoch.elapsed().as_micros() as u64
    }
}

/// A manually-advanced clock for deterministic tests of the staleness
/// timeout, so tests never depend on real elapsed time.
pub struct VirtualClock {
    now: AtomicU64,
}

impl VirtualClock {
    pub fn new() -> Self {
        VirtualClock {
            now: AtomicU64::new(0),
        }
    }

    /// Advances the clock by `us` microseconds.
    pub fn advance(&self, us: u64) {
        self.now.fetch_add(us, Ordering::SeqCst);
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for VirtualClock {
    fn now_us(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
