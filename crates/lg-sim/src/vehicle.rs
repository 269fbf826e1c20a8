//! The vehicle actor.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lg_core::{PointId, SimRng, VehicleId};
use lg_package::Package;
use lg_point::{DistributionPoint, Outcome, Request};
use tracing::{debug, info};

use crate::{SimContext, SimError, SimResult};

/// Where a vehicle is.  A vehicle is never at a point and travelling at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    At(PointId),
    InTransit { from: PointId, to: PointId },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::At(p) => write!(f, "at {p}"),
            Position::InTransit { from, to } => write!(f, "travelling {from} -> {to}"),
        }
    }
}

/// Per-vehicle counters, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VehicleStats {
    /// Completed hops between adjacent points.
    pub advances:   u64,
    pub pickups:    u64,
    pub deliveries: u64,
}

/// A vehicle circling the ring.
///
/// Owned by its own thread while the simulation runs and handed back by
/// [`run`](Self::run) afterwards, so its final state can be inspected.
pub struct Vehicle {
    id:       VehicleId,
    capacity: usize,
    position: Position,
    held:     Vec<Arc<Package>>,
    rng:      SimRng,
    stats:    VehicleStats,
}

impl Vehicle {
    pub fn new(id: VehicleId, capacity: usize, start: PointId, rng: SimRng) -> Self {
        Self {
            id,
            capacity,
            position: Position::At(start),
            held: Vec::with_capacity(capacity),
            rng,
            stats: VehicleStats::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Packages on board, in pickup order.
    #[inline]
    pub fn held(&self) -> &[Arc<Package>] {
        &self.held
    }

    #[inline]
    pub fn stats(&self) -> VehicleStats {
        self.stats
    }

    /// Actor loop: visit the current point, then travel to the next one,
    /// until shutdown.  Returns the vehicle in its final state.
    pub fn run(mut self, ctx: &SimContext) -> SimResult<Vehicle> {
        debug!(vehicle = %self.id, position = %self.position, "vehicle started");
        while !ctx.shutdown.is_triggered() {
            self.visit(ctx)?;
            if !self.advance(ctx) {
                break;
            }
        }
        debug!(vehicle = %self.id, held = self.held.len(), stats = ?self.stats, "vehicle stopped");
        Ok(self)
    }

    /// Deliver, then pick up, at the current point.  No-op while in transit.
    pub fn visit(&mut self, ctx: &SimContext) -> SimResult<()> {
        let Position::At(here) = self.position else {
            return Ok(());
        };
        let point = ctx.ring.get(here).ok_or(SimError::PointOutOfRange {
            point: here,
            len:   ctx.ring.len(),
        })?;
        self.try_deliver(ctx, point)?;
        self.try_pickup(ctx, point)?;
        debug_assert!(
            self.held.len() <= self.capacity,
            "{} holds {} packages over capacity {}",
            self.id,
            self.held.len(),
            self.capacity
        );
        Ok(())
    }

    /// Travel to the next point on the ring, then dwell.
    ///
    /// Returns `false` if shutdown interrupted the trip; the vehicle then
    /// stays in transit.
    pub fn advance(&mut self, ctx: &SimContext) -> bool {
        let from = match self.position {
            Position::At(p) => p,
            Position::InTransit { to, .. } => to,
        };
        let to = ctx.ring.next(from);
        self.position = Position::InTransit { from, to };
        debug!(vehicle = %self.id, %from, %to, "departing");

        if !ctx.shutdown.sleep(self.travel_time(ctx)) {
            return false;
        }
        self.position = Position::At(to);
        self.stats.advances += 1;
        debug!(vehicle = %self.id, point = %to, "arrived");

        ctx.dwell.is_zero() || ctx.shutdown.sleep(ctx.dwell)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Only the first held package is checked; a later package bound for
    /// this point waits until it reaches the front.
    fn try_deliver(&mut self, ctx: &SimContext, point: &DistributionPoint) -> SimResult<bool> {
        let here = point.id();
        let package = match self.held.first() {
            Some(first) if first.destination() == here => Arc::clone(first),
            _ => return Ok(false),
        };

        let request = Request::Dropoff { requester: self.id, package: Arc::clone(&package) };
        match point.submit(request) {
            Outcome::Accepted => {
                self.held.remove(0);
                let record = package.deliver(self.id, here, ctx.clock.now())?;
                self.stats.deliveries += 1;
                info!(vehicle = %self.id, package = %record.package, point = %here, "delivered");
                ctx.report_delivery(record);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn try_pickup(&mut self, ctx: &SimContext, point: &DistributionPoint) -> SimResult<bool> {
        if self.held.len() >= self.capacity {
            return Ok(false);
        }
        let Some(package) = point.submit(Request::Pickup { requester: self.id }).into_package() else {
            return Ok(false);
        };
        package.load(self.id, ctx.clock.now())?;
        debug!(vehicle = %self.id, %package, point = %point.id(), "picked up");
        self.held.push(package);
        self.stats.pickups += 1;
        Ok(true)
    }

    fn travel_time(&mut self, ctx: &SimContext) -> Duration {
        let (min, max) = ctx.travel;
        let (lo, hi) = (min.as_micros() as u64, max.as_micros() as u64);
        if lo >= hi {
            return min;
        }
        Duration::from_micros(self.rng.gen_range(lo..=hi))
    }
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("position", &self.position)
            .field("held", &self.held.iter().map(|p| p.id()).collect::<Vec<_>>())
            .field("stats", &self.stats)
            .finish()
    }
}
