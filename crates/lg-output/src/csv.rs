//! CSV output backend.
//!
//! Creates `deliveries.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use lg_package::DeliveryRecord;

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const HEADER: [&str; 7] = ["package", "origin", "destination", "created", "loaded", "arrived", "carrier"];

/// Writes one row per delivered package.
///
/// Rows are the serde form of [`DeliveryRecord`]: ids as plain integers and
/// stamps as microseconds since the Unix epoch, so the file loads cleanly
/// into numeric tooling and deserializes back into records.
pub struct CsvWriter {
    deliveries: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) `deliveries.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        // Header written by hand so an empty run still gets one.
        let mut deliveries = WriterBuilder::new()
            .has_headers(false)
            .from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record(HEADER)?;
        Ok(Self { deliveries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_delivery(&mut self, r: &DeliveryRecord) -> OutputResult<()> {
        self.deliveries.serialize(r)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        Ok(())
    }
}
