//! Request and outcome types exchanged with a distribution point.

use std::fmt;
use std::sync::Arc;

use lg_core::VehicleId;
use lg_package::Package;

/// What a vehicle asks a distribution point to do.
#[derive(Debug, Clone)]
pub enum Request {
    /// Hand over the oldest package waiting in the outgoing queue.
    Pickup { requester: VehicleId },

    /// Take `package` into the incoming queue.
    Dropoff { requester: VehicleId, package: Arc<Package> },
}

impl Request {
    #[inline]
    pub fn requester(&self) -> VehicleId {
        match self {
            Request::Pickup { requester } | Request::Dropoff { requester, .. } => *requester,
        }
    }

    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self, Request::Pickup { .. })
    }
}

/// How a request was resolved.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Pickup succeeded; the vehicle now owns this package.
    Loaded(Arc<Package>),

    /// Pickup found no package waiting.  A normal negative result.
    Unavailable,

    /// Dropoff succeeded; the package is in the incoming queue.
    Accepted,

    /// The simulation shut down before the request was serviced.  A dropoff
    /// payload stays with the submitter.
    Abandoned,
}

impl Outcome {
    /// The loaded package, if this is a successful pickup.
    pub fn into_package(self) -> Option<Arc<Package>> {
        match self {
            Outcome::Loaded(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }
}

/// Handle identifying one submitted request at one point.
///
/// Tickets are issued in submission order and never reused, so a submitter
/// always finds its own resolution and never another caller's.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
