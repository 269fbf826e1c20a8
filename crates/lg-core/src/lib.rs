//! `lg-core` - foundational types for the `rust_logistics` ring simulator.
//!
//! This crate is a dependency of every other `lg-*` crate.  It has no `lg-*`
//! dependencies and minimal external ones (`rand`, `thiserror`,
//! `parking_lot`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `PointId`, `VehicleId`, `PackageId`                   |
//! | [`config`]      | `NetworkConfig` and its validation                    |
//! | [`time`]        | `Stamp`, `SimClock`                                   |
//! | [`rng`]         | `SimRng` (seeded, with per-actor children)            |
//! | [`signal`]      | `Shutdown` - one-way stop flag + progress notify      |
//! | [`error`]       | `LgError`, `LgResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, stamps, and config. |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod signal;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::NetworkConfig;
pub use error::{LgError, LgResult};
pub use ids::{PackageId, PointId, VehicleId};
pub use rng::SimRng;
pub use signal::Shutdown;
pub use time::{SimClock, Stamp};
