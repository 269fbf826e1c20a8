//! ring - command-line driver for the rust_logistics ring simulator.
//!
//! Builds a ring of distribution points, scatters packages across it, lets
//! the vehicles circle until every package is delivered, then writes the
//! delivery records.
//!
//! ```text
//! ring -s 5 -c 2 -p 20 -a 3 --seed 42 --out output/ring --format both
//! RUST_LOG=debug ring --config network.json -p 50
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lg_core::NetworkConfig;
use lg_output::{BothWriters, CsvWriter, OutputWriter, PackageFileWriter, RecordingObserver};
use lg_sim::{Network, NetworkBuilder, RunReport};


/// Simulate vehicles carrying packages around a ring of distribution points.
///
/// `-s`, `-c`, `-p` and `-a` are required unless `--config` supplies them.
#[derive(Parser, Debug)]
#[command(name = "ring")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of distribution points (at least 2)
    #[arg(short = 's', long, required_unless_present = "config")]
    points: Option<usize>,

    /// Number of vehicles
    #[arg(short = 'c', long, required_unless_present = "config")]
    vehicles: Option<usize>,

    /// Number of packages
    #[arg(short = 'p', long, required_unless_present = "config")]
    packages: Option<usize>,

    /// Packages a vehicle can hold at once
    #[arg(short = 'a', long, required_unless_present = "config")]
    capacity: Option<usize>,

    /// Master RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Shortest hop between adjacent points, in milliseconds
    #[arg(long)]
    travel_min_ms: Option<u64>,

    /// Longest hop between adjacent points, in milliseconds
    #[arg(long)]
    travel_max_ms: Option<u64>,

    /// Pause after each arrival, in milliseconds
    #[arg(long)]
    dwell_ms: Option<u64>,

    /// Directory receiving delivery records
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Which delivery records to write
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// JSON file with a NetworkConfig; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `deliveries.csv`
    Csv,
    /// One `Package_<n>.txt` per package
    Files,
    /// Both of the above
    Both,
}

impl Args {
    /// File values, or the four required counts over default timings, overlaid
    /// with whatever flags were given.
    fn network_config(&self) -> Result<NetworkConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => {
                let missing: Vec<&str> = [
                    ("-s/--points", self.points),
                    ("-c/--vehicles", self.vehicles),
                    ("-p/--packages", self.packages),
                    ("-a/--capacity", self.capacity),
                ]
                .into_iter()
                .filter_map(|(flag, value)| value.is_none().then_some(flag))
                .collect();
                if !missing.is_empty() {
                    bail!("missing required values: {}", missing.join(", "));
                }
                NetworkConfig::default()
            }
        };
        if let Some(v) = self.points        { config.points = v; }
        if let Some(v) = self.vehicles      { config.vehicles = v; }
        if let Some(v) = self.packages      { config.packages = v; }
        if let Some(v) = self.capacity      { config.capacity = v; }
        if let Some(v) = self.travel_min_ms { config.travel_min_ms = v; }
        if let Some(v) = self.travel_max_ms { config.travel_max_ms = v; }
        if let Some(v) = self.dwell_ms      { config.dwell_ms = v; }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<NetworkConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Run `network` with `writer` attached, surfacing any write failure.
fn run_with<W: OutputWriter>(network: Network, writer: W) -> Result<(RunReport, usize)> {
    let mut obs = RecordingObserver::new(writer);
    let report = network.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        bail!("writing delivery records failed: {e}");
    }
    Ok((report, obs.recorded()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let args = Args::parse();
    let config = args.network_config()?;

    info!(
        points = config.points,
        vehicles = config.vehicles,
        packages = config.packages,
        capacity = config.capacity,
        seed = ?config.seed,
        "starting ring simulation"
    );

    let network = NetworkBuilder::new(config.clone()).build()?;

    let out = args.out.as_path();
    std::fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    let t0 = Instant::now();
    let (report, recorded) = match args.format {
        Format::Csv => run_with(network, CsvWriter::new(out)?)?,
        Format::Files => run_with(network, PackageFileWriter::new(out)?)?,
        Format::Both => run_with(
            network,
            BothWriters::new(CsvWriter::new(out)?, PackageFileWriter::new(out)?),
        )?,
    };
    let elapsed = t0.elapsed();

    println!(
        "Delivered {}/{} packages in {:.3} s ({} records written to {})",
        report.delivered,
        report.expected,
        elapsed.as_secs_f64(),
        recorded,
        out.display()
    );
    println!();
    println!("{:<12} {:>9} {:>8} {:>11}  {:<20}", "Vehicle", "Advances", "Pickups", "Deliveries", "Final position");
    println!("{}", "-".repeat(66));
    for v in &report.vehicles {
        let s = v.stats();
        println!(
            "{:<12} {:>9} {:>8} {:>11}  {:<20}",
            v.id().to_string(),
            s.advances,
            s.pickups,
            s.deliveries,
            v.position().to_string(),
        );
    }

    Ok(())
}
