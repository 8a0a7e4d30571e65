use std::fmt;

use ep_core::{ChecksumRule, CoreError, LogFormat, RegionId, TimeStep};
use thiserror::Error;

/// Which row a mass-conservation failure was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowScope {
    Global,
    Region(RegionId),
}

impl fmt::Display for RowScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowScope::Global     => f.write_str("global"),
            RowScope::Region(id) => write!(f, "region {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("region {region} at time {time} has no captured initial population")]
    MissingPopulation {
        time:   TimeStep,
        region: RegionId,
    },

    #[error(
        "mass conservation violated at time {time} ({scope}): {rule} checksum {checksum} outside [{min}, {max}]"
    )]
    MassConservation {
        time:     TimeStep,
        scope:    RowScope,
        rule:     ChecksumRule,
        checksum: f64,
        min:      f64,
        max:      f64,
    },

    #[error("region {region} at time {time}: {format} state vector needs {expected} fields, got {got}")]
    FieldCount {
        time:     TimeStep,
        region:   RegionId,
        format:   LogFormat,
        expected: usize,
        got:      usize,
    },

    #[error("region {region} at time {time}: {column} field is not a finite number ({value})")]
    NonFinite {
        time:   TimeStep,
        region: RegionId,
        column: &'static str,
        value:  f64,
    },

    #[error("region {region} at time {time}: summed person counts overflow")]
    CountOverflow {
        time:   TimeStep,
        region: RegionId,
    },

    #[error("total initial population is zero at time {time}")]
    ZeroPopulation { time: TimeStep },

    #[error("region {region} has invalid initial population {value}")]
    InvalidPopulation {
        region: RegionId,
        value:  f64,
    },

    #[error("line {line}: time marker {found} is earlier than current time {previous}")]
    TimeRegression {
        previous: TimeStep,
        found:    TimeStep,
        line:     usize,
    },

    #[error("line {line}: state record for region {region} appears before any time marker")]
    RecordBeforeTime {
        line:   usize,
        region: RegionId,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;
