//! Unit and concurrency tests for lg-point.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use lg_core::{PackageId, PointId, Shutdown, Stamp, VehicleId};
use lg_package::Package;

use crate::{DistributionPoint, Outcome, Request, Ring};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn package(id: u32, origin: u32, destination: u32) -> Arc<Package> {
    Arc::new(Package::new(PackageId(id), PointId(origin), PointId(destination), Stamp::ZERO).unwrap())
}

fn point(id: u32) -> (Arc<DistributionPoint>, Arc<Shutdown>) {
    let shutdown = Arc::new(Shutdown::new());
    let point = Arc::new(DistributionPoint::new(PointId(id), Arc::clone(&shutdown)));
    (point, shutdown)
}

fn stop(point: &DistributionPoint, shutdown: &Shutdown, worker: JoinHandle<()>) {
    shutdown.trigger();
    point.halt();
    worker.join().unwrap();
}

fn pickup(v: u32) -> Request {
    Request::Pickup { requester: VehicleId(v) }
}

fn dropoff(v: u32, package: &Arc<Package>) -> Request {
    Request::Dropoff { requester: VehicleId(v), package: Arc::clone(package) }
}

// ── Pickup ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pickup_tests {
    use super::*;

    #[test]
    fn empty_outgoing_is_unavailable_without_worker() {
        // No worker thread: a queued request would block forever.
        let (p, _shutdown) = point(0);
        assert!(matches!(p.submit(pickup(0)), Outcome::Unavailable));
        assert_eq!(p.pending_requests(), 0);
    }

    #[test]
    fn pickups_follow_fifo_order() {
        let (p, shutdown) = point(0);
        p.enqueue_outgoing(package(0, 0, 1));
        p.enqueue_outgoing(package(1, 0, 2));
        let worker = p.spawn_worker().unwrap();

        let first = p.submit(pickup(0)).into_package().unwrap();
        let second = p.submit(pickup(0)).into_package().unwrap();
        assert_eq!(first.id(), PackageId(0));
        assert_eq!(second.id(), PackageId(1));
        assert!(matches!(p.submit(pickup(0)), Outcome::Unavailable));
        assert_eq!(p.outgoing_len(), 0);
        assert_eq!(p.pending_requests(), 0);

        stop(&p, &shutdown, worker);
    }

    #[test]
    fn concurrent_pickups_never_share_a_package() {
        let (p, shutdown) = point(0);
        for i in 0..40 {
            p.enqueue_outgoing(package(i, 0, 1));
        }
        let worker = p.spawn_worker().unwrap();

        let takers: Vec<_> = (0..4)
            .map(|v| {
                let p = Arc::clone(&p);
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Some(pkg) = p.submit(pickup(v)).into_package() {
                        got.push(pkg.id());
                    }
                    got
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for t in takers {
            for id in t.join().unwrap() {
                assert!(seen.insert(id), "{id} handed out twice");
            }
        }
        assert_eq!(seen.len(), 40);
        assert_eq!(p.outgoing_len(), 0);

        stop(&p, &shutdown, worker);
    }
}

// ── Dropoff ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dropoff_tests {
    use super::*;

    #[test]
    fn dropoff_is_accepted_into_incoming() {
        let (p, shutdown) = point(1);
        let worker = p.spawn_worker().unwrap();

        let pkg = package(5, 0, 1);
        assert!(p.submit(dropoff(0, &pkg)).is_accepted());
        assert_eq!(p.incoming_len(), 1);
        assert_eq!(p.incoming_snapshot()[0].id(), PackageId(5));

        stop(&p, &shutdown, worker);
    }

    #[test]
    fn two_concurrent_dropoffs_both_land() {
        let (p, shutdown) = point(1);
        let worker = p.spawn_worker().unwrap();

        let a = package(0, 0, 1);
        let b = package(1, 2, 1);
        let ta = {
            let (p, a) = (Arc::clone(&p), Arc::clone(&a));
            thread::spawn(move || p.submit(dropoff(0, &a)))
        };
        let tb = {
            let (p, b) = (Arc::clone(&p), Arc::clone(&b));
            thread::spawn(move || p.submit(dropoff(1, &b)))
        };
        assert!(ta.join().unwrap().is_accepted());
        assert!(tb.join().unwrap().is_accepted());

        let ids: HashSet<_> = p.incoming_snapshot().iter().map(|x| x.id()).collect();
        assert_eq!(ids, HashSet::from([PackageId(0), PackageId(1)]));

        stop(&p, &shutdown, worker);
    }

    #[test]
    fn many_concurrent_dropoffs_each_resolved_once() {
        let (p, shutdown) = point(0);
        let worker = p.spawn_worker().unwrap();

        let senders: Vec<_> = (0..8u32)
            .map(|v| {
                let p = Arc::clone(&p);
                thread::spawn(move || {
                    (0..25u32)
                        .map(|k| p.submit(dropoff(v, &package(v * 100 + k, 1, 0))))
                        .filter(Outcome::is_accepted)
                        .count()
                })
            })
            .collect();

        let accepted: usize = senders.into_iter().map(|t| t.join().unwrap()).sum();
        assert_eq!(accepted, 200);

        let incoming = p.incoming_snapshot();
        let unique: HashSet<_> = incoming.iter().map(|x| x.id()).collect();
        assert_eq!(incoming.len(), 200);
        assert_eq!(unique.len(), 200);
        assert_eq!(p.pending_requests(), 0);

        stop(&p, &shutdown, worker);
    }
}

// ── Shutdown ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod shutdown_tests {
    use super::*;

    #[test]
    fn worker_exits_on_halt() {
        let (p, shutdown) = point(0);
        let worker = p.spawn_worker().unwrap();
        thread::sleep(Duration::from_millis(10));
        stop(&p, &shutdown, worker);
    }

    #[test]
    fn waiting_submitter_is_released_as_abandoned() {
        // No worker: the dropoff can only be released by shutdown.
        let (p, shutdown) = point(0);
        let pkg = package(0, 1, 0);
        let waiter = {
            let (p, pkg) = (Arc::clone(&p), Arc::clone(&pkg));
            thread::spawn(move || p.submit(dropoff(0, &pkg)))
        };
        while p.pending_requests() == 0 {
            thread::sleep(Duration::from_millis(1));
        }

        shutdown.trigger();
        p.halt();
        assert!(matches!(waiter.join().unwrap(), Outcome::Abandoned));
        assert_eq!(p.pending_requests(), 0);
        assert_eq!(p.incoming_len(), 0);
    }

    #[test]
    fn submit_after_shutdown_is_abandoned() {
        let (p, shutdown) = point(0);
        p.enqueue_outgoing(package(0, 0, 1));
        shutdown.trigger();
        assert!(matches!(p.submit(pickup(0)), Outcome::Abandoned));
        assert_eq!(p.outgoing_len(), 1);
    }
}

// ── Ring ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ring_tests {
    use super::*;

    #[test]
    fn ring_ids_and_wraparound() {
        let shutdown = Arc::new(Shutdown::new());
        let ring = Ring::new(3, &shutdown);
        assert_eq!(ring.len(), 3);
        let ids: Vec<_> = ring.iter().map(|p| p.id()).collect();
        assert_eq!(ids, [PointId(0), PointId(1), PointId(2)]);
        assert_eq!(ring.next(PointId(2)), PointId(0));
        assert!(ring.get(PointId(3)).is_none());
    }

    #[test]
    fn totals_sum_across_points() {
        let shutdown = Arc::new(Shutdown::new());
        let ring = Ring::new(2, &shutdown);
        ring.get(PointId(0)).unwrap().enqueue_outgoing(package(0, 0, 1));
        ring.get(PointId(1)).unwrap().enqueue_outgoing(package(1, 1, 0));
        assert_eq!(ring.waiting_total(), 2);
        assert_eq!(ring.delivered_total(), 0);

        let workers: Vec<_> = ring.iter().map(|p| p.spawn_worker().unwrap()).collect();
        let p1 = ring.get(PointId(1)).unwrap();
        assert!(p1.submit(dropoff(0, &package(2, 0, 1))).is_accepted());
        assert_eq!(ring.delivered_total(), 1);

        shutdown.trigger();
        ring.halt_all();
        for w in workers {
            w.join().unwrap();
        }
    }
}
