// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic time for the rendering thread.
//!
//! [`TimePoint`] is a point in monotonic time measured in nanoseconds from an
//! arbitrary per-process epoch. The lifecycle loop never reads the clock
//! directly; it goes through the [`MonotonicClock`] trait so frame timing can
//! be driven deterministically under test. [`SystemClock`] is the production
//! implementation over [`std::time::Instant`].

use core::fmt;
use std::time::Instant;

/// Nanoseconds per second.
pub const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A point in monotonic time, in nanoseconds from an arbitrary epoch.
///
/// Comparisons and differences are only meaningful between points produced by
/// the same clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimePoint(pub u64);

impl TimePoint {
    /// Returns the raw nanosecond value.
    #[inline]
    #[must_use]
    pub const fn nanos(self) -> u64 {
        self.0
    }

    /// Returns the nanoseconds elapsed since `earlier`, or zero if `earlier`
    /// is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_nanos_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns the seconds elapsed since `earlier` as an `f32`, saturating at
    /// zero if `earlier` is after `self`.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "frame deltas are far below f32 precision limits"
    )]
    pub fn seconds_since(self, earlier: Self) -> f32 {
        (self.saturating_nanos_since(earlier) as f64 / NANOS_PER_SEC as f64) as f32
    }
}

impl fmt::Debug for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimePoint({}ns)", self.0)
    }
}

/// A source of monotonic [`TimePoint`]s.
///
/// The lifecycle loop holds one of these and samples it once per draw tick.
/// Test doubles implement it with a manually advanced counter.
pub trait MonotonicClock {
    /// Returns the current point in monotonic time.
    fn now(&self) -> TimePoint;
}

/// A [`MonotonicClock`] backed by [`std::time::Instant`].
///
/// Nanoseconds are counted from the moment the clock was constructed.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is the moment of construction.
    #[must_use]
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

impl MonotonicClock for SystemClock {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u64 nanoseconds cover centuries of process uptime"
    )]
    fn now(&self) -> TimePoint {
        TimePoint(self.origin.elapsed().as_nanos() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_since_converts_nanos() {
        let earlier = TimePoint(1_000_000_000);
        let later = TimePoint(1_500_000_000);
        let dt = later.seconds_since(earlier);
        assert!((dt - 0.5).abs() < 1e-6, "expected 0.5s, got {dt}");
    }

    #[test]
    fn differences_saturate_at_zero() {
        let earlier = TimePoint(2_000);
        let later = TimePoint(1_000);
        assert_eq!(later.saturating_nanos_since(earlier), 0);
        assert_eq!(later.seconds_since(earlier), 0.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a, "Instant-backed clock must not go backwards");
    }
}
