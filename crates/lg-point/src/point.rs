//! The `DistributionPoint` mediator.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use lg_core::{PackageId, PointId, Shutdown, VehicleId};
use lg_package::Package;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::{Outcome, Request, Ticket};

// ── Internal state ────────────────────────────────────────────────────────────

/// A request waiting in the point's queue.
///
/// `payload` is the dropoff package until the worker moves it into the
/// incoming queue.
struct Pending {
    ticket:    Ticket,
    requester: VehicleId,
    pickup:    bool,
    payload:   Option<Arc<Package>>,
    outcome:   Option<Outcome>,
}

/// What the worker did with the head request (used for narration only).
enum Serviced {
    Handed { to: VehicleId, package: PackageId },
    Received { from: VehicleId, package: PackageId },
    Declined { to: VehicleId },
}

#[derive(Default)]
struct PointState {
    outgoing:    VecDeque<Arc<Package>>,
    incoming:    Vec<Arc<Package>>,
    requests:    VecDeque<Pending>,
    next_ticket: u64,
}

impl PointState {
    fn enqueue(&mut self, request: Request) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        let pending = match request {
            Request::Pickup { requester } => Pending {
                ticket,
                requester,
                pickup: true,
                payload: None,
                outcome: None,
            },
            Request::Dropoff { requester, package } => Pending {
                ticket,
                requester,
                pickup: false,
                payload: Some(package),
                outcome: None,
            },
        };
        self.requests.push_back(pending);
        ticket
    }

    /// Resolve the head request if it is still unresolved.
    ///
    /// A pickup that reaches the head after the outgoing queue drained is
    /// resolved as `Unavailable`: outgoing queues only shrink after setup, so
    /// leaving it pending would stall every request behind it.
    fn service_head(&mut self) -> Option<Serviced> {
        let head = self.requests.front_mut()?;
        if head.outcome.is_some() {
            return None;
        }
        let serviced = if head.pickup {
            match self.outgoing.pop_front() {
                Some(package) => {
                    let id = package.id();
                    head.outcome = Some(Outcome::Loaded(package));
                    Serviced::Handed { to: head.requester, package: id }
                }
                None => {
                    head.outcome = Some(Outcome::Unavailable);
                    Serviced::Declined { to: head.requester }
                }
            }
        } else {
            let package = head.payload.take()?;
            let id = package.id();
            self.incoming.push(package);
            head.outcome = Some(Outcome::Accepted);
            Serviced::Received { from: head.requester, package: id }
        };
        Some(serviced)
    }

    /// Remove `ticket` from the queue and return its outcome, if resolved.
    fn take_resolved(&mut self, ticket: Ticket) -> Option<Outcome> {
        let pos = self
            .requests
            .iter()
            .position(|r| r.ticket == ticket && r.outcome.is_some())?;
        self.requests.remove(pos).and_then(|r| r.outcome)
    }

    /// Drop an unresolved request.  Any dropoff payload stays with the caller.
    fn withdraw(&mut self, ticket: Ticket) {
        self.requests.retain(|r| r.ticket != ticket);
    }
}

// ── DistributionPoint ─────────────────────────────────────────────────────────

/// One stop on the ring.
///
/// Owns an outgoing queue (packages waiting for pickup, FIFO) and an incoming
/// queue (packages delivered here, grows monotonically).  All access goes
/// through [`submit`](Self::submit), serviced one request at a time by the
/// worker loop in [`run_worker`](Self::run_worker).
pub struct DistributionPoint {
    id:       PointId,
    state:    Mutex<PointState>,
    cv:       Condvar,
    shutdown: Arc<Shutdown>,
}

impl DistributionPoint {
    pub fn new(id: PointId, shutdown: Arc<Shutdown>) -> Self {
        Self {
            id,
            state: Mutex::new(PointState::default()),
            cv: Condvar::new(),
            shutdown,
        }
    }

    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Place a freshly created package in the outgoing queue.  Setup only.
    pub fn enqueue_outgoing(&self, package: Arc<Package>) {
        self.state.lock().outgoing.push_back(package);
        self.cv.notify_all();
    }

    /// Submit a request and block until it is resolved.
    ///
    /// - A pickup against an empty outgoing queue returns
    ///   [`Outcome::Unavailable`] at once, without queueing.
    /// - Otherwise the caller waits for its own ticket, removes it from the
    ///   queue, and returns its outcome.
    /// - If shutdown is observed before resolution the request is withdrawn and
    ///   [`Outcome::Abandoned`] is returned.
    pub fn submit(&self, request: Request) -> Outcome {
        let mut state = self.state.lock();
        if self.shutdown.is_triggered() {
            return Outcome::Abandoned;
        }
        if request.is_pickup() && state.outgoing.is_empty() {
            trace!(point = %self.id, requester = %request.requester(), "pickup short-circuited");
            return Outcome::Unavailable;
        }

        let ticket = state.enqueue(request);
        self.cv.notify_all();

        loop {
            if let Some(outcome) = state.take_resolved(ticket) {
                // The next head is now eligible.
                self.cv.notify_all();
                return outcome;
            }
            if self.shutdown.is_triggered() {
                state.withdraw(ticket);
                return Outcome::Abandoned;
            }
            self.cv.wait(&mut state);
        }
    }

    /// The worker loop.  Returns once shutdown is observed.
    ///
    /// Only the head of the request queue is ever inspected, so at most one
    /// request is in service at a time.  Sleeps on the condition variable
    /// whenever the head is absent or already resolved.
    pub fn run_worker(&self) {
        debug!(point = %self.id, "worker started");
        let mut state = self.state.lock();
        loop {
            if self.shutdown.is_triggered() {
                break;
            }
            match state.service_head() {
                Some(serviced) => {
                    self.cv.notify_all();
                    match serviced {
                        Serviced::Handed { to, package } => {
                            debug!(point = %self.id, vehicle = %to, %package, "handed package");
                        }
                        Serviced::Received { from, package } => {
                            debug!(point = %self.id, vehicle = %from, %package, "received package");
                            self.shutdown.notify_progress();
                        }
                        Serviced::Declined { to } => {
                            trace!(point = %self.id, vehicle = %to, "no package for pickup");
                        }
                    }
                }
                None => self.cv.wait(&mut state),
            }
        }
        debug!(point = %self.id, pending = state.requests.len(), "worker stopped");
    }

    /// Spawn [`run_worker`](Self::run_worker) on a named thread.
    pub fn spawn_worker(self: &Arc<Self>) -> io::Result<JoinHandle<()>> {
        let point = Arc::clone(self);
        thread::Builder::new()
            .name(format!("point-{}", self.id.0))
            .spawn(move || point.run_worker())
    }

    /// Wake the worker and every waiting submitter so they observe shutdown.
    pub fn halt(&self) {
        let _state = self.state.lock();
        self.cv.notify_all();
    }

    // ── Read access (each under the point lock) ───────────────────────────

    pub fn outgoing_len(&self) -> usize {
        self.state.lock().outgoing.len()
    }

    pub fn incoming_len(&self) -> usize {
        self.state.lock().incoming.len()
    }

    /// Number of requests currently queued (resolved or not).
    pub fn pending_requests(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// Clone of the incoming queue, in arrival order.
    pub fn incoming_snapshot(&self) -> Vec<Arc<Package>> {
        self.state.lock().incoming.clone()
    }

    /// Clone of the outgoing queue, in pickup order.
    pub fn outgoing_snapshot(&self) -> Vec<Arc<Package>> {
        self.state.lock().outgoing.iter().cloned().collect()
    }
}
