// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Time sources for driving `tick`.
//!
//! Timestamps are offsets from the clock's origin, so a service started at
//! `Timestamp::ZERO` and a test that ticks at `1.1s` agree on what "elapsed"
//! means without touching wall-clock time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Offset from a clock's origin.
pub type Timestamp = Duration;

/// Source of the `now` passed to `tick`.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic clock whose origin is its creation instant.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
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

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed()
    }
}

/// Manually advanced clock. Clones share the same time.
///
/// Hosts with their own timebase (frame time, simulation time) set it
/// directly; tests use it to step time deterministically.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock to `now`. Going backwards is allowed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set(&self, now: Timestamp) {
        // u64 nanoseconds cover ~584 years
        self.nanos.store(now.as_nanos() as u64, Ordering::Release);
    }

    /// Advances the clock by `delta`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&self, delta: Duration) {
        self.nanos
            .fetch_add(delta.as_nanos() as u64, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }
}
