//! Shared simulation state handed to every actor.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use lg_core::{Shutdown, SimClock};
use lg_package::DeliveryRecord;
use lg_point::Ring;

/// Everything the actors share for one run.
///
/// Built once by [`NetworkBuilder`][crate::NetworkBuilder]; fixed after
/// construction apart from the interior state of the points and the shutdown
/// signal.  Dropped when the last actor finishes.
pub struct SimContext {
    /// The distribution points, in ring order.
    pub ring: Ring,

    /// Total number of packages; shutdown fires when this many are delivered.
    pub expected: usize,

    pub shutdown: Arc<Shutdown>,

    pub clock: SimClock,

    /// Inclusive bounds of one ring hop.
    pub travel: (Duration, Duration),

    /// Pause after each arrival.
    pub dwell: Duration,

    deliveries: Sender<DeliveryRecord>,
}

impl SimContext {
    pub fn new(
        ring:       Ring,
        expected:   usize,
        shutdown:   Arc<Shutdown>,
        clock:      SimClock,
        travel:     (Duration, Duration),
        dwell:      Duration,
        deliveries: Sender<DeliveryRecord>,
    ) -> Self {
        Self { ring, expected, shutdown, clock, travel, dwell, deliveries }
    }

    /// Publish a delivery to the recording side.
    ///
    /// A closed receiver means nobody is recording; the delivery itself has
    /// already happened, so the record is dropped.
    pub fn report_delivery(&self, record: DeliveryRecord) {
        let _ = self.deliveries.send(record);
    }

    /// Raise shutdown and wake every point so blocked threads observe it.
    /// Returns `true` for the call that raised it.
    pub fn stop(&self) -> bool {
        let first = self.shutdown.trigger();
        self.ring.halt_all();
        first
    }
}
