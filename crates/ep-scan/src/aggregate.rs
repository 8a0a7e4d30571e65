//! Timestep Aggregator.
//!
//! Turns one Region State Table snapshot into output rows.  Both operations
//! are pure functions of their inputs.
//!
//! # Global rows
//!
//! ```text
//! count_k   = Σ_regions round(pop_region × frac_region_k)
//! global_k  = count_k / Σ_regions pop_region
//! checksum  = global_rule.sum(global)
//! ```
//!
//! NaN or infinite fields are rejected while decoding, and a person-count
//! sum that leaves `i64` is an error rather than a wrap.
//!
//! Rounding happens at the person-count level so region totals add up to
//! whole global totals.
//!
//! # Region rows
//!
//! The percent row is the decoded fractions verbatim; the totals row is
//! `round(pop_region × frac_k)`.  The checksum uses `region_rule`.

use ep_core::{
    AggregateRow, ChecksumRule, Compartments, CoreError, LogFormat, PercentRow, RegionId,
    RegionRow, ScanConfig, TimeStep, TotalRow,
};

use crate::error::RowScope;
use crate::table::{InitialPopulation, RegionSnapshot};
use crate::{ScanError, ScanResult};

/// Format and checksum rules applied to every row of one run.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    pub format:      LogFormat,
    pub global_rule: ChecksumRule,
    pub region_rule: ChecksumRule,
}

impl Aggregator {
    pub fn new(format: LogFormat, global_rule: ChecksumRule, region_rule: ChecksumRule) -> Self {
        Self { format, global_rule, region_rule }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.format, config.global_rule(), config.region_checksum)
    }

    /// Population-weighted global row for `time`.
    pub fn aggregate_global(
        &self,
        time:        TimeStep,
        snapshot:    &RegionSnapshot,
        populations: &InitialPopulation,
    ) -> ScanResult<AggregateRow> {
        let total = populations.total();
        if total <= 0.0 {
            return Err(ScanError::ZeroPopulation { time });
        }

        let mut counts = Compartments::<i64>::default();
        for (region, fields) in snapshot {
            let population = populations.require(time, region.as_str())?;
            let (_, fractions) = self.decode(time, region, fields)?;
            counts = counts
                .checked_add(fractions.to_counts(population))
                .ok_or_else(|| ScanError::CountOverflow { time, region: region.clone() })?;
        }

        let fractions = counts.to_fractions(total);
        let checksum = self.global_rule.sum(&fractions);
        check(self.global_rule, checksum, time, RowScope::Global)?;

        Ok(AggregateRow { time, fractions, checksum })
    }

    /// Percent and totals rows for one region at `time`.
    pub fn aggregate_region(
        &self,
        time:       TimeStep,
        region:     &RegionId,
        fields:     &[f64],
        population: f64,
    ) -> ScanResult<(PercentRow, TotalRow)> {
        let (_, fractions) = self.decode(time, region, fields)?;

        let checksum = self.region_rule.sum(&fractions);
        check(self.region_rule, checksum, time, RowScope::Region(region.clone()))?;

        Ok((
            RegionRow { time, values: fractions },
            RegionRow { time, values: fractions.to_counts(population) },
        ))
    }

    fn decode(
        &self,
        time:   TimeStep,
        region: &RegionId,
        fields: &[f64],
    ) -> ScanResult<(f64, Compartments<f64>)> {
        self.format.decode(fields).map_err(|e| match e {
            CoreError::FieldCount { format, expected, got } => ScanError::FieldCount {
                time,
                region: region.clone(),
                format,
                expected,
                got,
            },
            CoreError::NonFinite { column, value } => ScanError::NonFinite {
                time,
                region: region.clone(),
                column,
                value,
            },
            other => ScanError::Core(other),
        })
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

fn check(rule: ChecksumRule, checksum: f64, time: TimeStep, scope: RowScope) -> ScanResult<()> {
    if rule.accepts(checksum) {
        return Ok(());
    }
    let (min, max) = rule.bounds();
    Err(ScanError::MassConservation { time, scope, rule, checksum, min, max })
}
