//! Observer trait for recording deliveries.

use lg_package::DeliveryRecord;

use crate::RunReport;

/// Callbacks invoked by [`Network::run`][crate::Network::run] on the calling
/// thread.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example - delivery printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl DeliveryObserver for Printer {
///     fn on_delivered(&mut self, record: &DeliveryRecord) {
///         println!("{} arrived at {}", record.package, record.destination);
///     }
/// }
/// ```
pub trait DeliveryObserver {
    /// Called exactly once per delivered package, in the order deliveries
    /// were reported.
    fn on_delivered(&mut self, _record: &DeliveryRecord) {}

    /// Called once after every actor has stopped.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`DeliveryObserver`] that does nothing.
pub struct NoopObserver;

impl DeliveryObserver for NoopObserver {}
