//! Simulation time as written by the upstream simulator.
//!
//! A bare non-negative integer line in the log marks the start of a new
//! step.  Steps are simulated days; the summarizer never converts them to
//! wall-clock time.

use std::fmt;

/// An absolute simulation step taken from a time-marker line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TimeStep(pub u64);

impl TimeStep {
    pub const ZERO: TimeStep = TimeStep(0);

    /// Parse a stripped time-marker line.
    ///
    /// Only ASCII digits are accepted (no sign, no decimal point, no
    /// whitespace).  Returns `None` for anything else, including values that
    /// overflow `u64`.
    pub fn parse_marker(line: &str) -> Option<TimeStep> {
        if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        line.parse::<u64>().ok().map(TimeStep)
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
