//! Finished row sequences handed to output consumers.

use std::collections::BTreeMap;

use ep_core::{AggregateRow, LogFormat, PercentRow, RegionId, TimeStep, TotalRow};

use crate::table::InitialPopulation;

/// One region's percent and totals rows, in time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSeries {
    pub percents: Vec<PercentRow>,
    pub totals:   Vec<TotalRow>,
}

impl RegionSeries {
    pub fn push(&mut self, percent: PercentRow, total: TotalRow) {
        self.percents.push(percent);
        self.totals.push(total);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.percents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.percents.is_empty()
    }
}

/// Everything one successful scan produced.
///
/// `aggregate` is empty unless the run's mode includes global rows, and
/// `regions` is empty unless it includes per-region rows.  `steps` always
/// lists every emitted time step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub format:      LogFormat,
    pub populations: InitialPopulation,
    pub steps:       Vec<TimeStep>,
    pub aggregate:   Vec<AggregateRow>,
    pub regions:     BTreeMap<RegionId, RegionSeries>,
}

impl ScanOutput {
    pub fn new(format: LogFormat, populations: InitialPopulation) -> Self {
        Self {
            format,
            populations,
            steps:     Vec::new(),
            aggregate: Vec::new(),
            regions:   BTreeMap::new(),
        }
    }

    /// Sum of all captured initial populations.
    pub fn total_population(&self) -> f64 {
        self.populations.total()
    }

    /// Emitted time steps, strictly increasing.
    pub fn times(&self) -> &[TimeStep] {
        &self.steps
    }

    /// `true` if no step was emitted.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
