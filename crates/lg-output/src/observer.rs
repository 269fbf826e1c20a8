//! `RecordingObserver<W>` - bridges `DeliveryObserver` to an `OutputWriter`.

use lg_package::DeliveryRecord;
use lg_sim::{DeliveryObserver, RunReport};
use tracing::warn;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DeliveryObserver`] that persists every delivery through any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `network.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct RecordingObserver<W: OutputWriter> {
    writer:     W,
    recorded:   usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RecordingObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, recorded: 0, last_error: None }
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Deliveries successfully handed to the writer.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to write delivery output");
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
                false
            }
        }
    }
}

impl<W: OutputWriter> DeliveryObserver for RecordingObserver<W> {
    fn on_delivered(&mut self, record: &DeliveryRecord) {
        let result = self.writer.write_delivery(record);
        if self.store_err(result) {
            self.recorded += 1;
        }
    }

    fn on_run_end(&mut self, _report: &RunReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
