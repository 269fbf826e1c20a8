//! The `Network` runner.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use lg_core::Stamp;
use lg_package::{DeliveryRecord, Package};
use tracing::{error, info};

use crate::{CompletionMonitor, DeliveryObserver, SimContext, SimError, SimResult, Vehicle};

/// How long the calling thread blocks on the delivery channel before
/// re-checking shutdown and actor liveness.
const RECV_POLL: Duration = Duration::from_millis(20);

/// A fully set-up simulation, ready to [`run`](Self::run).
///
/// Create via [`NetworkBuilder`][crate::NetworkBuilder].
pub struct Network {
    ctx:        Arc<SimContext>,
    vehicles:   Vec<Vehicle>,
    packages:   Vec<Arc<Package>>,
    deliveries: Receiver<DeliveryRecord>,
    monitor:    CompletionMonitor,
}

/// Final state of a finished run.
pub struct RunReport {
    /// Package count the run was waiting for.
    pub expected:  usize,
    /// Sum of incoming-queue sizes when the monitor stopped.
    pub delivered: usize,
    pub started:   Stamp,
    pub finished:  Stamp,
    /// Vehicles in their final state, in id order.
    pub vehicles:  Vec<Vehicle>,
    /// Every package, in id order.
    pub packages:  Vec<Arc<Package>>,
    /// The shared context, for inspecting the points after the run.
    pub context:   Arc<SimContext>,
}

impl RunReport {
    #[inline]
    pub fn elapsed_micros(&self) -> u64 {
        self.finished.micros_since(self.started)
    }
}

impl Network {
    pub(crate) fn new(
        ctx:        Arc<SimContext>,
        vehicles:   Vec<Vehicle>,
        packages:   Vec<Arc<Package>>,
        deliveries: Receiver<DeliveryRecord>,
        monitor:    CompletionMonitor,
    ) -> Self {
        Self { ctx, vehicles, packages, deliveries, monitor }
    }

    #[inline]
    pub fn context(&self) -> &Arc<SimContext> {
        &self.ctx
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn packages(&self) -> &[Arc<Package>] {
        &self.packages
    }

    /// Split into parts, for driving actors by hand.
    pub fn into_parts(self) -> (Arc<SimContext>, Vec<Vehicle>, Vec<Arc<Package>>, Receiver<DeliveryRecord>) {
        (self.ctx, self.vehicles, self.packages, self.deliveries)
    }

    /// Start every actor, feed deliveries to `observer` until completion,
    /// then join all threads.
    ///
    /// If any vehicle stops before shutdown (error or panic) the run is
    /// stopped early so no thread is left waiting; the first error is
    /// returned after everything has been joined.
    pub fn run<O: DeliveryObserver>(self, observer: &mut O) -> SimResult<RunReport> {
        let Network { ctx, vehicles, packages, deliveries, monitor } = self;
        let started = ctx.clock.now();

        info!(
            points = ctx.ring.len(),
            vehicles = vehicles.len(),
            packages = ctx.expected,
            "starting simulation"
        );

        // ── Spawn actors ──────────────────────────────────────────────────
        let mut actors = Actors::default();
        for point in ctx.ring.iter() {
            match point.spawn_worker() {
                Ok(h) => actors.points.push(h),
                Err(e) => return Err(actors.abort(&ctx, e)),
            }
        }

        let ctx_m = Arc::clone(&ctx);
        let spawned = thread::Builder::new()
            .name("monitor".into())
            .spawn(move || monitor.run(&ctx_m));
        let monitor_handle = match spawned {
            Ok(h) => h,
            Err(e) => return Err(actors.abort(&ctx, e)),
        };

        for vehicle in vehicles {
            let ctx_v = Arc::clone(&ctx);
            let spawned = thread::Builder::new()
                .name(format!("vehicle-{}", vehicle.id().0))
                .spawn(move || vehicle.run(&ctx_v));
            match spawned {
                Ok(h) => actors.vehicles.push(h),
                Err(e) => {
                    actors.monitor = Some(monitor_handle);
                    return Err(actors.abort(&ctx, e));
                }
            }
        }
        let Actors { points: point_handles, vehicles: vehicle_handles, .. } = actors;

        // ── Drain deliveries until shutdown ───────────────────────────────
        while !ctx.shutdown.is_triggered() {
            match deliveries.recv_timeout(RECV_POLL) {
                Ok(record) => observer.on_delivered(&record),
                Err(RecvTimeoutError::Timeout) => {
                    if !ctx.shutdown.is_triggered()
                        && vehicle_handles.iter().any(JoinHandle::is_finished)
                    {
                        error!("a vehicle stopped before completion; stopping the run");
                        ctx.stop();
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        // ── Join everything ───────────────────────────────────────────────
        let mut first_err: Option<SimError> = None;
        let mut keep = |result: SimResult<()>| {
            if let Err(e) = result {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        };

        let delivered = match join(monitor_handle, "monitor") {
            Ok(n) => n,
            Err(e) => {
                keep(Err(e));
                ctx.ring.delivered_total()
            }
        };

        let mut finished_vehicles = Vec::with_capacity(vehicle_handles.len());
        for (i, handle) in vehicle_handles.into_iter().enumerate() {
            match join(handle, &format!("vehicle-{i}")) {
                Ok(v) => finished_vehicles.push(v),
                Err(e) => {
                    ctx.stop();
                    keep(Err(e));
                }
            }
        }

        for (i, handle) in point_handles.into_iter().enumerate() {
            keep(join(handle, &format!("point-{i}")).map(|_| ()));
        }

        // Records sent after the loop exited (the delivering vehicle has
        // been joined, so nothing more can arrive).
        for record in deliveries.try_iter() {
            observer.on_delivered(&record);
        }

        if let Some(e) = first_err {
            return Err(e);
        }

        let report = RunReport {
            expected: ctx.expected,
            delivered,
            started,
            finished: ctx.clock.now(),
            vehicles: finished_vehicles,
            packages,
            context: ctx,
        };
        info!(
            delivered = report.delivered,
            elapsed_ms = report.elapsed_micros() / 1_000,
            "simulation finished"
        );
        observer.on_run_end(&report);
        Ok(report)
    }
}

/// Join a thread, flattening a panic into [`SimError::ActorPanicked`].
fn join<T>(handle: JoinHandle<T>, name: &str) -> SimResult<T::Output>
where
    T: JoinOutput,
{
    match handle.join() {
        Ok(out) => out.into_result(),
        Err(_) => Err(SimError::ActorPanicked(name.to_owned())),
    }
}

/// Threads started so far by [`Network::run`].
#[derive(Default)]
pub(crate) struct Actors {
    pub(crate) points:   Vec<JoinHandle<()>>,
    pub(crate) monitor:  Option<JoinHandle<SimResult<usize>>>,
    pub(crate) vehicles: Vec<JoinHandle<SimResult<Vehicle>>>,
}

impl Actors {
    /// Stop and join everything already started, then wrap the spawn
    /// failure.  Results of the joined threads are discarded.
    pub(crate) fn abort(self, ctx: &SimContext, e: std::io::Error) -> SimError {
        error!(error = %e, "failed to spawn actor thread; stopping the run");
        ctx.stop();
        for handle in self.vehicles {
            let _ = handle.join();
        }
        if let Some(handle) = self.monitor {
            let _ = handle.join();
        }
        for handle in self.points {
            let _ = handle.join();
        }
        SimError::Spawn(e)
    }
}

/// Uniform view over thread return types (`()` and `SimResult<T>`).
trait JoinOutput {
    type Output;
    fn into_result(self) -> SimResult<Self::Output>;
}

impl JoinOutput for () {
    type Output = ();
    fn into_result(self) -> SimResult<()> {
        Ok(())
    }
}

impl<T> JoinOutput for SimResult<T> {
    type Output = T;
    fn into_result(self) -> SimResult<T> {
        self
    }
}
