//! Scan observer trait for progress reporting.

use ep_core::TimeStep;

use crate::series::ScanOutput;
use crate::table::InitialPopulation;

/// Callbacks invoked by [`LogScanner::scan`][crate::LogScanner::scan] at key
/// points of a run.
///
/// Rows are not streamed through the observer: a run that fails part-way
/// must not leave half an output behind, so rows are only handed over in
/// the final [`ScanOutput`].
///
/// # Example — progress logger
///
/// ```rust,ignore
/// struct Progress { every: u64 }
///
/// impl ScanObserver for Progress {
///     fn on_step(&mut self, time: TimeStep, regions: usize) {
///         if time.0 % self.every == 0 {
///             tracing::info!(%time, regions, "aggregated");
///         }
///     }
/// }
/// ```
pub trait ScanObserver {
    /// Called once the priming pass has captured every initial population.
    fn on_priming_done(&mut self, _populations: &InitialPopulation) {}

    /// Called after each emitted time step with the number of regions it
    /// covered.
    fn on_step(&mut self, _time: TimeStep, _regions: usize) {}

    /// Called once after the final step has been aggregated.
    fn on_scan_end(&mut self, _output: &ScanOutput) {}
}

/// A [`ScanObserver`] that does nothing.
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
