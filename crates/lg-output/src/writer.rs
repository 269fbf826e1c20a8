//! The `OutputWriter` trait implemented by all backend writers.

use lg_package::DeliveryRecord;

use crate::OutputResult;

/// Trait implemented by the CSV and per-package file writers.
///
/// Errors are returned to [`RecordingObserver`][crate::RecordingObserver],
/// which keeps the first one for [`take_error`][crate::RecordingObserver::take_error].
pub trait OutputWriter {
    /// Persist one delivered package.
    fn write_delivery(&mut self, record: &DeliveryRecord) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent - safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Writes every record to two writers.  The second still runs when the
/// first fails; the first error is returned.
pub struct BothWriters<A: OutputWriter, B: OutputWriter> {
    pub first:  A,
    pub second: B,
}

impl<A: OutputWriter, B: OutputWriter> BothWriters<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: OutputWriter, B: OutputWriter> OutputWriter for BothWriters<A, B> {
    fn write_delivery(&mut self, record: &DeliveryRecord) -> OutputResult<()> {
        let a = self.first.write_delivery(record);
        let b = self.second.write_delivery(record);
        a.and(b)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let a = self.first.finish();
        let b = self.second.finish();
        a.and(b)
    }
}
