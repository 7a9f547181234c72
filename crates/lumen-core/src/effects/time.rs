//! Physical time effect and handlers.
//!
//! Stores never read the system clock directly. They receive a
//! [`PhysicalClock`] at construction; production code passes [`SystemClock`],
//! tests pass a controllable clock from `lumen-testkit`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock source, in milliseconds since the Unix epoch.
pub trait PhysicalClock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

impl<C: PhysicalClock + ?Sized> PhysicalClock for Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

impl<C: PhysicalClock + ?Sized> PhysicalClock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Production clock backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock handler.
    pub fn new() -> Self {
        Self
    }
}

impl PhysicalClock for SystemClock {
    fn now_ms(&self) -> u64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }
}

/// Clamps an inner clock so successive readings never decrease.
///
/// Wall clocks can step backwards (NTP corrections, manual changes); records
/// stamped through this wrapper keep a non-decreasing order regardless.
pub struct MonotonicClock<C> {
    inner: C,
    high_water: AtomicU64,
}

impl<C: PhysicalClock> MonotonicClock<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            high_water: AtomicU64::new(0),
        }
    }

    /// Highest reading handed out so far.
    pub fn last_reading(&self) -> u64 {
        self.high_water.load(Ordering::Acquire)
    }
}

impl<C: PhysicalClock> PhysicalClock for MonotonicClock<C> {
    fn now_ms(&self) -> u64 {
        let observed = self.inner.now_ms();
        let previous = self.high_water.fetch_max(observed, Ordering::AcqRel);
        previous.max(observed)
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for MonotonicClock<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicClock")
            .field("inner", &self.inner)
            .field("high_water", &self.high_water.load(Ordering::Relaxed))
            .finish()
    }
}
