//! The `OutputWriter` trait implemented by all backend writers.

use ep_core::{AggregateRow, LogFormat, RegionId};
use ep_scan::{InitialPopulation, RegionSeries, ScanOutput};

use crate::OutputResult;

/// Trait implemented by the CSV and SQLite writers.
pub trait OutputWriter {
    /// Write the captured initial population of every region.
    fn write_populations(&mut self, populations: &InitialPopulation) -> OutputResult<()>;

    /// Write the global time series.
    fn write_aggregate(&mut self, format: LogFormat, rows: &[AggregateRow]) -> OutputResult<()>;

    /// Write one region's percentage and totals series.
    fn write_region(&mut self, format: LogFormat, region: &RegionId, series: &RegionSeries) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Hand every part of a finished scan to `writer`.
///
/// The global series is skipped when the scan produced none (region-only
/// mode), so no empty aggregate table is created.
pub fn write_output<W: OutputWriter>(writer: &mut W, output: &ScanOutput) -> OutputResult<()> {
    writer.write_populations(&output.populations)?;

    if !output.aggregate.is_empty() {
        writer.write_aggregate(output.format, &output.aggregate)?;
    }

    for (region, series) in &output.regions {
        writer.write_region(output.format, region, series)?;
    }

    tracing::info!(
        steps   = output.steps.len(),
        regions = output.regions.len(),
        "output written"
    );
    Ok(())
}
