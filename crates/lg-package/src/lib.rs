//! `lg-package` - a shipment and its lifecycle.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`package`] | `Package`, `PackageStage` - identity, route, timestamps      |
//! | [`record`]  | `DeliveryRecord` - the terminal snapshot of a package        |
//! | [`error`]   | `PackageError`, `PackageResult<T>`                           |
//!
//! # Lifecycle
//!
//! ```text
//! Waiting ──load(v)──▶ Carried(v) ──deliver(v, dest)──▶ Delivered(v)
//! ```
//!
//! Each transition happens at most once and stamps its own timestamp.  Only
//! the vehicle currently carrying a package may deliver it, so the loaded and
//! arrived stamps always have a single writer.

pub mod error;
pub mod package;
pub mod record;


pub use error::{PackageError, PackageResult};
pub use package::{Package, PackageStage};
pub use record::DeliveryRecord;
