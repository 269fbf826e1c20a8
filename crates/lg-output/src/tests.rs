//! Integration tests for lg-output.

use lg_core::{PackageId, PointId, Stamp, VehicleId};
use lg_package::DeliveryRecord;
use tempfile::TempDir;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn record(id: u32) -> DeliveryRecord {
    DeliveryRecord {
        package:     PackageId(id),
        origin:      PointId(0),
        destination: PointId(2),
        created:     Stamp(1_000_000),
        loaded:      Stamp(1_500_000),
        arrived:     Stamp(3_250_000),
        carrier:     VehicleId(1),
    }
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::{CsvWriter, HEADER};
    use crate::writer::OutputWriter;

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, HEADER);
        assert_eq!(rdr.records().count(), 0);
    }

    #[test]
    fn csv_rows_hold_raw_values() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_delivery(&record(4)).unwrap();
        w.write_delivery(&record(9)).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // idempotent

        let mut rdr = ::csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "4");
        assert_eq!(&rows[0][2], "2");       // destination
        assert_eq!(&rows[0][5], "3250000"); // arrived
        assert_eq!(&rows[0][6], "1");       // carrier
        assert_eq!(&rows[1][0], "9");
    }

    #[test]
    fn csv_rows_read_back_as_records() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_delivery(&record(2)).unwrap();
        w.finish().unwrap();

        let mut rdr = ::csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        let back: Vec<DeliveryRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, [record(2)]);
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;
    use crate::files::PackageFileWriter;
    use crate::writer::OutputWriter;

    #[test]
    fn one_file_per_package() {
        let dir = tmp();
        let mut w = PackageFileWriter::new(dir.path()).unwrap();
        w.write_delivery(&record(0)).unwrap();
        w.write_delivery(&record(1)).unwrap();
        assert_eq!(w.written(), 2);
        assert!(dir.path().join("Package_0.txt").exists());
        assert!(dir.path().join("Package_1.txt").exists());
    }

    #[test]
    fn file_lists_route_stamps_and_carrier() {
        let dir = tmp();
        let mut w = PackageFileWriter::new(dir.path()).unwrap();
        let rec = record(3);
        w.write_delivery(&rec).unwrap();

        let text = std::fs::read_to_string(w.path_for(&rec)).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "package:     Package_3");
        assert_eq!(lines[1], "origin:      DPoint_0");
        assert_eq!(lines[2], "destination: DPoint_2");
        assert_eq!(lines[5], "arrived:     3.250000");
        assert_eq!(lines[6], "carrier:     Vehicle_1");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        PackageFileWriter::new(&nested).unwrap();
        assert!(nested.is_dir());
    }
}

#[cfg(test)]
mod observer_tests {
    use std::io;

    use lg_core::NetworkConfig;
    use lg_sim::{DeliveryObserver, NetworkBuilder};

    use super::*;
    use crate::{BothWriters, CsvWriter, OutputError, OutputResult, OutputWriter, PackageFileWriter, RecordingObserver};

    /// Fails every write; counts calls.
    struct Broken {
        calls: usize,
    }

    impl OutputWriter for Broken {
        fn write_delivery(&mut self, _r: &DeliveryRecord) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(io::Error::other(format!("write {}", self.calls))))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn keeps_first_error_only() {
        let mut obs = RecordingObserver::new(Broken { calls: 0 });
        obs.on_delivered(&record(0));
        obs.on_delivered(&record(1));
        assert_eq!(obs.recorded(), 0);

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("write 1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }

    #[test]
    fn end_to_end_run_writes_every_delivery() {
        let dir = tmp();
        let config = NetworkConfig {
            seed:          Some(7),
            travel_min_ms: 1,
            travel_max_ms: 2,
            dwell_ms:      0,
            ..NetworkConfig::new(4, 2, 12, 3)
        };
        let writer = BothWriters::new(
            CsvWriter::new(dir.path()).unwrap(),
            PackageFileWriter::new(dir.path()).unwrap(),
        );
        let mut obs = RecordingObserver::new(writer);
        let report = NetworkBuilder::new(config).build().unwrap().run(&mut obs).unwrap();

        assert!(obs.take_error().is_none());
        assert_eq!(obs.recorded(), 12);
        assert_eq!(report.delivered, 12);

        let mut rdr = ::csv::Reader::from_path(dir.path().join("deliveries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 12);
        for i in 0..12 {
            assert!(dir.path().join(format!("Package_{i}.txt")).exists());
        }
    }
}
