//! The terminal snapshot of a delivered package.

use lg_core::{PackageId, PointId, Stamp, VehicleId};

/// Everything worth persisting about a package once it has arrived.
///
/// Produced exactly once per package by [`Package::deliver`][crate::Package::deliver].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRecord {
    pub package:     PackageId,
    pub origin:      PointId,
    pub destination: PointId,
    pub created:     Stamp,
    pub loaded:      Stamp,
    pub arrived:     Stamp,
    /// The vehicle that carried the package to its destination.
    pub carrier:     VehicleId,
}

impl DeliveryRecord {
    /// Microseconds between pickup and arrival.
    #[inline]
    pub fn transit_micros(&self) -> u64 {
        self.arrived.micros_since(self.loaded)
    }

    /// Microseconds between creation and arrival.
    #[inline]
    pub fn total_micros(&self) -> u64 {
        self.arrived.micros_since(self.created)
    }
}
