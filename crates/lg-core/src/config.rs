//! Network configuration.

use std::time::Duration;

use crate::{LgError, LgResult};

/// Default lower bound of a ring hop, in milliseconds.
pub const DEFAULT_TRAVEL_MIN_MS: u64 = 100;
/// Default upper bound of a ring hop, in milliseconds.
pub const DEFAULT_TRAVEL_MAX_MS: u64 = 1_000;
/// Default pause after arriving at a point, in milliseconds.
pub const DEFAULT_DWELL_MS: u64 = 100;

/// Top-level simulation configuration.
///
/// Built by the application crate from CLI flags or a JSON file and handed
/// to `lg_sim::NetworkBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkConfig {
    /// Number of distribution points on the ring.  Must be at least 2.
    pub points: usize,

    /// Number of vehicles circling the ring.
    pub vehicles: usize,

    /// Number of packages generated at setup.
    pub packages: usize,

    /// Maximum packages a vehicle carries at once.
    pub capacity: usize,

    /// Master RNG seed.  `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Inclusive bounds of the random travel time between adjacent points.
    pub travel_min_ms: u64,
    pub travel_max_ms: u64,

    /// Fixed pause after each arrival, before delivery and pickup.
    pub dwell_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            points:        2,
            vehicles:      1,
            packages:      0,
            capacity:      1,
            seed:          None,
            travel_min_ms: DEFAULT_TRAVEL_MIN_MS,
            travel_max_ms: DEFAULT_TRAVEL_MAX_MS,
            dwell_ms:      DEFAULT_DWELL_MS,
        }
    }
}

impl NetworkConfig {
    /// Convenience constructor with default timing and no fixed seed.
    pub fn new(points: usize, vehicles: usize, packages: usize, capacity: usize) -> Self {
        Self { points, vehicles, packages, capacity, ..Self::default() }
    }

    /// Check every invariant the simulation relies on.
    ///
    /// A run with packages but no vehicle (or zero capacity) could never
    /// finish, so it is rejected here rather than left to hang.
    pub fn validate(&self) -> LgResult<()> {
        if self.points < 2 {
            return Err(LgError::Config(format!(
                "at least 2 distribution points are required, got {}",
                self.points
            )));
        }
        if self.points > u32::MAX as usize
            || self.vehicles > u32::MAX as usize
            || self.packages > u32::MAX as usize
        {
            return Err(LgError::Config("counts must fit in 32 bits".into()));
        }
        if self.travel_min_ms > self.travel_max_ms {
            return Err(LgError::Config(format!(
                "travel_min_ms ({}) exceeds travel_max_ms ({})",
                self.travel_min_ms, self.travel_max_ms
            )));
        }
        if self.packages > 0 && self.vehicles == 0 {
            return Err(LgError::Config(
                "packages cannot be delivered without at least one vehicle".into(),
            ));
        }
        if self.packages > 0 && self.capacity == 0 {
            return Err(LgError::Config(
                "packages cannot be delivered with zero vehicle capacity".into(),
            ));
        }
        Ok(())
    }

    /// Travel-time bounds as a `Duration` pair.
    #[inline]
    pub fn travel_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.travel_min_ms),
            Duration::from_millis(self.travel_max_ms),
        )
    }

    #[inline]
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}
