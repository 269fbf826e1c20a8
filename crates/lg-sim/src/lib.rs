//! `lg-sim` - composition root and actors for the rust_logistics simulator.
//!
//! # Actors
//!
//! ```text
//! one thread per point    DistributionPoint::run_worker  (lg-point)
//! one thread per vehicle  Vehicle::run
//!   loop until shutdown:
//!     ① visit current point - deliver first held package if it is bound
//!        here, then pick up one package if there is room
//!     ② travel to the next point on the ring (random bounded delay)
//! one monitor thread      CompletionMonitor::run
//!   wait for progress → sum incoming queues → == expected? raise shutdown
//! calling thread          Network::run
//!   drain DeliveryRecords → DeliveryObserver, then join every actor
//! ```
//!
//! All shared state lives in one [`SimContext`], built by [`NetworkBuilder`]
//! and handed to every actor by `Arc`.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lg_core::NetworkConfig;
//! use lg_sim::{NetworkBuilder, NoopObserver};
//!
//! let network = NetworkBuilder::new(NetworkConfig::new(4, 2, 10, 3)).build()?;
//! let report = network.run(&mut NoopObserver)?;
//! assert_eq!(report.delivered, 10);
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod monitor;
pub mod network;
pub mod observer;
pub mod vehicle;


pub use builder::NetworkBuilder;
pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use monitor::CompletionMonitor;
pub use network::{Network, RunReport};
pub use observer::{DeliveryObserver, NoopObserver};
pub use vehicle::{Position, Vehicle, VehicleStats};
