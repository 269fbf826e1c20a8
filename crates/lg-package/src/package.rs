//! The `Package` type.

use std::fmt;

use lg_core::{PackageId, PointId, Stamp, VehicleId};
use parking_lot::Mutex;

use crate::{DeliveryRecord, PackageError, PackageResult};

/// Where a package currently is, from the package's own point of view.
///
/// While `Waiting` the package sits in a distribution point's outgoing queue.
/// `Delivered` keeps the final carrier for the delivery record; the package is
/// then in its destination's incoming queue and no longer in any vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStage {
    Waiting,
    Carried(VehicleId),
    Delivered(VehicleId),
}

#[derive(Debug)]
struct PackageState {
    stage:   PackageStage,
    loaded:  Option<Stamp>,
    arrived: Option<Stamp>,
}

/// One shipment from `origin` to `destination`.
///
/// Shared as `Arc<Package>` between the point queues and the vehicle holding
/// it.  Identity and route are immutable; the lifecycle lives behind a mutex
/// that only the current holder writes.
#[derive(Debug)]
pub struct Package {
    id:          PackageId,
    origin:      PointId,
    destination: PointId,
    created:     Stamp,
    state:       Mutex<PackageState>,
}

impl Package {
    /// Create a package waiting at `origin`.
    ///
    /// # Errors
    ///
    /// [`PackageError::SameEndpoints`] if `origin == destination`.
    pub fn new(
        id:          PackageId,
        origin:      PointId,
        destination: PointId,
        created:     Stamp,
    ) -> PackageResult<Self> {
        if origin == destination {
            return Err(PackageError::SameEndpoints(id, origin));
        }
        Ok(Self {
            id,
            origin,
            destination,
            created,
            state: Mutex::new(PackageState {
                stage:   PackageStage::Waiting,
                loaded:  None,
                arrived: None,
            }),
        })
    }

    #[inline]
    pub fn id(&self) -> PackageId {
        self.id
    }

    #[inline]
    pub fn origin(&self) -> PointId {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> PointId {
        self.destination
    }

    #[inline]
    pub fn created(&self) -> Stamp {
        self.created
    }

    pub fn loaded(&self) -> Option<Stamp> {
        self.state.lock().loaded
    }

    pub fn arrived(&self) -> Option<Stamp> {
        self.state.lock().arrived
    }

    pub fn stage(&self) -> PackageStage {
        self.state.lock().stage
    }

    /// The vehicle holding the package right now, if any.
    pub fn carrier(&self) -> Option<VehicleId> {
        match self.state.lock().stage {
            PackageStage::Carried(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self.state.lock().stage, PackageStage::Delivered(_))
    }

    /// Hand the package to vehicle `by` at time `at`.
    ///
    /// The loaded stamp is clamped to be no earlier than `created`.
    pub fn load(&self, by: VehicleId, at: Stamp) -> PackageResult<()> {
        let mut state = self.state.lock();
        match state.stage {
            PackageStage::Waiting => {}
            PackageStage::Carried(_) => return Err(PackageError::AlreadyLoaded(self.id)),
            PackageStage::Delivered(_) => return Err(PackageError::AlreadyDelivered(self.id)),
        }
        state.stage = PackageStage::Carried(by);
        state.loaded = Some(at.max(self.created));
        Ok(())
    }

    /// Mark the package as arrived at `point`, handed off by vehicle `by`.
    ///
    /// Returns the package's [`DeliveryRecord`].  The arrived stamp is clamped
    /// to be no earlier than the loaded stamp.
    pub fn deliver(&self, by: VehicleId, point: PointId, at: Stamp) -> PackageResult<DeliveryRecord> {
        if point != self.destination {
            return Err(PackageError::WrongDestination {
                package:     self.id,
                destination: self.destination,
                at:          point,
            });
        }
        let mut state = self.state.lock();
        let loaded = match (state.stage, state.loaded) {
            (PackageStage::Carried(carrier), Some(loaded)) if carrier == by => loaded,
            (PackageStage::Carried(carrier), _) => {
                return Err(PackageError::WrongCarrier {
                    package:      self.id,
                    carrier,
                    requested_by: by,
                });
            }
            (PackageStage::Waiting, _) => return Err(PackageError::NotCarried(self.id)),
            (PackageStage::Delivered(_), _) => return Err(PackageError::AlreadyDelivered(self.id)),
        };
        let arrived = at.max(loaded);
        state.stage = PackageStage::Delivered(by);
        state.arrived = Some(arrived);
        Ok(DeliveryRecord {
            package:     self.id,
            origin:      self.origin,
            destination: self.destination,
            created:     self.created,
            loaded,
            arrived,
            carrier:     by,
        })
    }

    /// The delivery record, once the package has arrived.
    pub fn record(&self) -> Option<DeliveryRecord> {
        let state = self.state.lock();
        match (state.stage, state.loaded, state.arrived) {
            (PackageStage::Delivered(carrier), Some(loaded), Some(arrived)) => Some(DeliveryRecord {
                package:     self.id,
                origin:      self.origin,
                destination: self.destination,
                created:     self.created,
                loaded,
                arrived,
                carrier,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} -> {})", self.id, self.origin, self.destination)
    }
}
