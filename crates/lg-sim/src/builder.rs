//! Fluent builder for constructing a [`Network`].

use std::sync::Arc;

use lg_core::{NetworkConfig, PackageId, PointId, Shutdown, SimClock, SimRng, VehicleId};
use lg_package::Package;
use lg_point::Ring;
use tracing::info;

use crate::{CompletionMonitor, Network, SimContext, SimError, SimResult, Vehicle};

/// Fluent builder for [`Network`].
///
/// # Required inputs
///
/// - [`NetworkConfig`] - point/vehicle/package counts, capacity, timing, seed
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                        |
/// |-------------------------|------------------------------------------------|
/// | `.routes(v)`            | random origin, destination redrawn until ≠     |
/// | `.vehicle_starts(v)`    | uniformly random point per vehicle             |
/// | `.clock(c)`             | `SimClock::start()` at build time              |
/// | `.monitor(m)`           | `CompletionMonitor::default()`                 |
///
/// # Example
///
/// ```rust,ignore
/// let network = NetworkBuilder::new(NetworkConfig::new(3, 1, 1, 1))
///     .routes(vec![(PointId(0), PointId(1))])
///     .vehicle_starts(vec![PointId(0)])
///     .build()?;
/// ```
pub struct NetworkBuilder {
    config:  NetworkConfig,
    routes:  Option<Vec<(PointId, PointId)>>,
    starts:  Option<Vec<PointId>>,
    clock:   Option<SimClock>,
    monitor: CompletionMonitor,
}

impl NetworkBuilder {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            routes:  None,
            starts:  None,
            clock:   None,
            monitor: CompletionMonitor::default(),
        }
    }

    /// Fix each package's `(origin, destination)`.  Must be length
    /// `config.packages`.
    pub fn routes(mut self, routes: Vec<(PointId, PointId)>) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Fix each vehicle's starting point.  Must be length `config.vehicles`.
    pub fn vehicle_starts(mut self, starts: Vec<PointId>) -> Self {
        self.starts = Some(starts);
        self
    }

    pub fn clock(mut self, clock: SimClock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn monitor(mut self, monitor: CompletionMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Validate inputs, create points, packages, and vehicles, and return a
    /// ready-to-run [`Network`].
    ///
    /// Every package is already in its origin's outgoing queue on return.
    pub fn build(self) -> SimResult<Network> {
        let config = self.config;
        config.validate()?;
        let n = config.points;

        // ── Validate optional inputs ──────────────────────────────────────
        if let Some(routes) = &self.routes {
            check_len(config.packages, routes.len(), "package routes")?;
            for &(origin, destination) in routes {
                check_point(origin, n)?;
                check_point(destination, n)?;
            }
        }
        if let Some(starts) = &self.starts {
            check_len(config.vehicles, starts.len(), "vehicle starts")?;
            for &start in starts {
                check_point(start, n)?;
            }
        }

        let mut rng = match config.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        let shutdown = Arc::new(Shutdown::new());
        let ring = Ring::new(n, &shutdown);
        let clock = self.clock.unwrap_or_else(SimClock::start);

        // ── Packages, placed in their origin's outgoing queue ─────────────
        let mut packages = Vec::with_capacity(config.packages);
        for i in 0..config.packages {
            let (origin, destination) = match &self.routes {
                Some(routes) => routes[i],
                None => {
                    let origin = rng.index(n);
                    let destination = rng.index_other_than(n, origin);
                    (PointId(origin as u32), PointId(destination as u32))
                }
            };
            let package = Arc::new(Package::new(PackageId(i as u32), origin, destination, clock.now())?);
            if let Some(point) = ring.get(origin) {
                point.enqueue_outgoing(Arc::clone(&package));
            }
            packages.push(package);
        }

        // ── Vehicles ──────────────────────────────────────────────────────
        let vehicles = (0..config.vehicles)
            .map(|i| {
                let start = match &self.starts {
                    Some(starts) => starts[i],
                    None => PointId(rng.index(n) as u32),
                };
                Vehicle::new(VehicleId(i as u32), config.capacity, start, rng.child(i as u64))
            })
            .collect();

        info!(
            points = n,
            vehicles = config.vehicles,
            packages = config.packages,
            capacity = config.capacity,
            "network built"
        );

        let (tx, rx) = crossbeam_channel::unbounded();
        let ctx = SimContext::new(
            ring,
            config.packages,
            shutdown,
            clock,
            config.travel_bounds(),
            config.dwell(),
            tx,
        );
        Ok(Network::new(Arc::new(ctx), vehicles, packages, rx, self.monitor))
    }
}

fn check_len(expected: usize, got: usize, what: &'static str) -> SimResult<()> {
    if expected != got {
        return Err(SimError::CountMismatch { expected, got, what });
    }
    Ok(())
}

fn check_point(point: PointId, len: usize) -> SimResult<()> {
    if point.index() >= len {
        return Err(SimError::PointOutOfRange { point, len });
    }
    Ok(())
}
