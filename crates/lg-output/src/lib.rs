//! `lg-output` - delivery record writers for the rust_logistics simulator.
//!
//! Two backends are provided:
//!
//! | Writer               | Files created                                    |
//! |----------------------|--------------------------------------------------|
//! | [`CsvWriter`]        | `deliveries.csv` - one row per package           |
//! | [`PackageFileWriter`]| `<package>.txt` - one file per package           |
//!
//! Both implement [`OutputWriter`] and are driven by [`RecordingObserver`],
//! which implements `lg_sim::DeliveryObserver`.  [`BothWriters`] fans out to
//! two writers at once.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lg_output::{CsvWriter, RecordingObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RecordingObserver::new(writer);
//! network.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod files;
pub mod observer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use files::PackageFileWriter;
pub use observer::RecordingObserver;
pub use writer::{BothWriters, OutputWriter};
