//! Plain data rows handed from the aggregator to output consumers.
//!
//! Column order is fixed per [`LogFormat`]:
//! `sim_time, S, E, [VD1, VD2,] I, R, New_E, New_I, New_R, D[, pop_sum]`.

use crate::{Compartments, LogFormat, TimeStep};

/// Population-weighted global fractions for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateRow {
    pub time:      TimeStep,
    pub fractions: Compartments<f64>,
    /// Sum checked against the configured `ChecksumRule`.
    pub checksum:  f64,
}

impl AggregateRow {
    /// Header row: `sim_time`, compartment columns, `pop_sum`.
    pub fn header(format: LogFormat) -> Vec<&'static str> {
        let mut cols = vec!["sim_time"];
        cols.extend(Compartments::<f64>::columns(format));
        cols.push("pop_sum");
        cols
    }
}

/// One region's row for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionRow<T> {
    pub time:   TimeStep,
    pub values: Compartments<T>,
}

impl<T> RegionRow<T> {
    /// Header row: `sim_time` followed by the compartment columns.
    pub fn header(format: LogFormat) -> Vec<&'static str> {
        let mut cols = vec!["sim_time"];
        cols.extend(Compartments::<T>::columns(format));
        cols
    }
}

/// Per-region fractions, copied verbatim from the log.
pub type PercentRow = RegionRow<f64>;

/// Per-region rounded person counts.
pub type TotalRow = RegionRow<i64>;
