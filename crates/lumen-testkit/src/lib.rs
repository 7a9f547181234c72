//! # Lumen Testkit
//!
//! Deterministic implementations of the `lumen-core` effect traits. Tests use
//! these so ids and timestamps are predictable:
//!
//! - [`ManualClock`]: a clock that only moves when told to
//! - [`SequentialIds`]: UUIDs counting up from 1

use lumen_core::{IdGenerator, PhysicalClock};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Clock whose reading is set explicitly by the test.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    /// Start the clock at `now_ms`.
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    /// Jump to an absolute reading. May move backwards.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl PhysicalClock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Id generator yielding `00000000-0000-0000-0000-000000000001`, `...02`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many ids have been handed out.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(u128::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::at(100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 105);
        clock.set(50);
        assert_eq!(clock.now_ms(), 50);
    }

    #[test]
    fn test_sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_uuid(), Uuid::from_u128(1));
        assert_eq!(ids.next_uuid(), Uuid::from_u128(2));
        assert_eq!(ids.issued(), 2);
    }
}
