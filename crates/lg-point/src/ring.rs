//! The fixed circle of distribution points.

use std::sync::Arc;

use lg_core::{PointId, Shutdown};

use crate::DistributionPoint;

/// `N` distribution points in ring order.  Never resized after construction.
pub struct Ring {
    points: Vec<Arc<DistributionPoint>>,
}

impl Ring {
    /// Build `len` empty points sharing `shutdown`.
    pub fn new(len: usize, shutdown: &Arc<Shutdown>) -> Self {
        let points = (0..len)
            .map(|i| Arc::new(DistributionPoint::new(PointId(i as u32), Arc::clone(shutdown))))
            .collect();
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, id: PointId) -> Option<&Arc<DistributionPoint>> {
        self.points.get(id.index())
    }

    /// The point after `id` in ring order.
    #[inline]
    pub fn next(&self, id: PointId) -> PointId {
        id.next_on_ring(self.points.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DistributionPoint>> {
        self.points.iter()
    }

    /// Sum of incoming-queue sizes.  Each point is read under its own lock,
    /// so no individual count is torn.
    pub fn delivered_total(&self) -> usize {
        self.points.iter().map(|p| p.incoming_len()).sum()
    }

    /// Sum of outgoing-queue sizes.
    pub fn waiting_total(&self) -> usize {
        self.points.iter().map(|p| p.outgoing_len()).sum()
    }

    /// Wake every worker and submitter so they observe shutdown.
    pub fn halt_all(&self) {
        for point in &self.points {
            point.halt();
        }
    }
}
