//! `lg-point` - distribution points and the ring that holds them.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`request`] | `Request`, `Outcome`, `Ticket`                                  |
//! | [`point`]   | `DistributionPoint` - queues + rendezvous worker                |
//! | [`ring`]    | `Ring` - the fixed circle of points, aggregate counts           |
//!
//! # Rendezvous protocol
//!
//! A vehicle never touches a point's queues directly.  It calls
//! [`DistributionPoint::submit`], which appends a request under a fresh
//! [`Ticket`] and blocks until the point's worker thread has resolved that
//! ticket:
//!
//! ```text
//! vehicle ──submit──▶ requests: [t7 ✓] [t8 …] [t9 …]
//!                                 ▲
//!                     worker resolves head only; the head's submitter
//!                     removes it, then t8 becomes eligible
//! ```
//!
//! All three queues (outgoing, incoming, requests) live behind one mutex per
//! point; a single condition variable wakes the worker on new work and
//! submitters on resolution.

pub mod point;
pub mod request;
pub mod ring;

#[cfg(test)]
mod tests;

pub use point::DistributionPoint;
pub use request::{Outcome, Request, Ticket};
pub use ring::Ring;
