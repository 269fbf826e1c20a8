//! Per-package text file backend.
//!
//! Writes one `<package>.txt` per delivered package, e.g. `Package_3.txt`:
//!
//! ```text
//! package:     Package_3
//! origin:      DPoint_0
//! destination: DPoint_2
//! created:     1700000000.000000
//! loaded:      1700000000.412345
//! arrived:     1700000001.734001
//! carrier:     Vehicle_1
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lg_package::DeliveryRecord;
use tracing::debug;

use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes one small text file per delivered package into `dir`.
pub struct PackageFileWriter {
    dir:     PathBuf,
    written: usize,
}

impl PackageFileWriter {
    /// Use `dir` as the output directory, creating it if needed.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self { dir: dir.to_path_buf(), written: 0 })
    }

    /// Path of the file a record is written to.
    pub fn path_for(&self, record: &DeliveryRecord) -> PathBuf {
        self.dir.join(format!("{}.txt", record.package))
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl OutputWriter for PackageFileWriter {
    fn write_delivery(&mut self, r: &DeliveryRecord) -> OutputResult<()> {
        let path = self.path_for(r);
        let mut out = BufWriter::new(File::create(&path)?);
        writeln!(out, "package:     {}", r.package)?;
        writeln!(out, "origin:      {}", r.origin)?;
        writeln!(out, "destination: {}", r.destination)?;
        writeln!(out, "created:     {}", r.created)?;
        writeln!(out, "loaded:      {}", r.loaded)?;
        writeln!(out, "arrived:     {}", r.arrived)?;
        writeln!(out, "carrier:     {}", r.carrier)?;
        out.flush()?;
        self.written += 1;
        debug!(path = %path.display(), "wrote delivery record");
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
