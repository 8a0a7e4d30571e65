//! Periodic progress logging during a scan.

use ep_core::TimeStep;
use ep_scan::ScanObserver;

/// Logs an `info!` line every `every` aggregated steps.  Zero disables it.
pub struct ProgressObserver {
    every: usize,
    steps: usize,
}

impl ProgressObserver {
    pub fn new(every: usize) -> Self {
        Self { every, steps: 0 }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether the step just counted should be logged.
    fn due(&self) -> bool {
        self.every > 0 && self.steps % self.every == 0
    }
}

impl ScanObserver for ProgressObserver {
    fn on_step(&mut self, time: TimeStep, regions: usize) {
        self.steps += 1;
        if self.due() {
            tracing::info!(%time, regions, steps = self.steps, "aggregating");
        }
    }
}
