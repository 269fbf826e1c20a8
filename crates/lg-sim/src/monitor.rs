//! Global completion detection.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{SimContext, SimError, SimResult};

/// Upper bound on how long the monitor sleeps between counts when no
/// progress notification arrives.
pub const DEFAULT_RECHECK: Duration = Duration::from_millis(100);

/// Watches the ring's delivered total and raises shutdown when it reaches the
/// expected package count.
///
/// Between counts the monitor sleeps on the shutdown signal's progress
/// generation, which every accepted dropoff bumps; `recheck` only bounds that
/// sleep.
#[derive(Debug, Clone, Copy)]
pub struct CompletionMonitor {
    pub recheck: Duration,
}

impl Default for CompletionMonitor {
    fn default() -> Self {
        Self { recheck: DEFAULT_RECHECK }
    }
}

impl CompletionMonitor {
    pub fn new(recheck: Duration) -> Self {
        Self { recheck }
    }

    /// Run until every package is delivered (or shutdown is raised
    /// elsewhere).  Returns the delivered total observed at the end.
    ///
    /// # Errors
    ///
    /// [`SimError::Overdelivered`] if the total ever exceeds the expected
    /// count.  Shutdown is still raised in that case.
    pub fn run(&self, ctx: &SimContext) -> SimResult<usize> {
        loop {
            let seen = ctx.shutdown.generation();
            let delivered = ctx.ring.delivered_total();

            if delivered >= ctx.expected {
                ctx.stop();
                if delivered > ctx.expected {
                    warn!(expected = ctx.expected, delivered, "more packages delivered than exist");
                    return Err(SimError::Overdelivered { expected: ctx.expected, got: delivered });
                }
                info!(delivered, "all packages delivered; shutting down");
                return Ok(delivered);
            }

            if ctx.shutdown.is_triggered() {
                ctx.ring.halt_all();
                warn!(delivered, expected = ctx.expected, "shutdown raised before completion");
                return Ok(delivered);
            }

            debug!(delivered, expected = ctx.expected, "waiting for deliveries");
            ctx.shutdown.wait_progress(seen, self.recheck);
        }
    }
}
