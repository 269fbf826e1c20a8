//! Simulation time model.
//!
//! # Design
//!
//! Timestamps are `Stamp`s: microseconds since the Unix epoch.  They are
//! produced by a `SimClock` that anchors a wall-clock reading to a monotonic
//! `Instant` at construction:
//!
//!   stamp = start_unix_micros + origin.elapsed()
//!
//! The wall clock is read once, so stamps taken from the same clock never go
//! backwards even if the system time is adjusted mid-run.  Package lifecycle
//! ordering (`created <= loaded <= arrived`) depends on this.

use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ── Stamp ─────────────────────────────────────────────────────────────────────

/// An absolute timestamp in microseconds since the Unix epoch.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamp(pub u64);

impl Stamp {
    pub const ZERO: Stamp = Stamp(0);

    /// Microseconds elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn micros_since(self, earlier: Stamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole seconds since the epoch.
    #[inline]
    pub fn unix_secs(self) -> u64 {
        self.0 / 1_000_000
    }
}

impl fmt::Display for Stamp {
    /// `<secs>.<micros>` - sortable and unambiguous without a datetime library.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic source of [`Stamp`]s for one simulation run.
///
/// Cheap to copy; shared by value with every actor.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    /// Wall-clock time of clock construction, in microseconds since epoch.
    pub start_unix_micros: u64,
    origin: Instant,
}

impl SimClock {
    /// Anchor a new clock at the current wall-clock time.
    pub fn start() -> Self {
        let start_unix_micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0);
        Self { start_unix_micros, origin: Instant::now() }
    }

    /// Anchor a clock at an explicit epoch offset.  Useful for tests that
    /// compare rendered stamps.
    pub fn starting_at(start_unix_micros: u64) -> Self {
        Self { start_unix_micros, origin: Instant::now() }
    }

    /// The current timestamp.  Non-decreasing across calls.
    #[inline]
    pub fn now(&self) -> Stamp {
        Stamp(self.start_unix_micros + self.origin.elapsed().as_micros() as u64)
    }

    /// The stamp at which this clock started.
    #[inline]
    pub fn start_stamp(&self) -> Stamp {
        Stamp(self.start_unix_micros)
    }
}
