//! CSV output backend.
//!
//! Layout under the configured output directory:
//!
//! ```text
//! populations.csv
//! aggregate/aggregate_timeseries.csv
//! region_<id>/region_<id>_percentage_timeseries.csv
//! region_<id>/region_<id>_totals_timeseries.csv
//! ```
//!
//! Directories are created when missing.  Existing files are overwritten;
//! nothing else in the directory is touched.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::Writer;
use ep_core::{AggregateRow, LogFormat, PercentRow, RegionId, TotalRow};
use ep_scan::{InitialPopulation, RegionSeries};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes scan results to a tree of CSV files.
pub struct CsvWriter {
    dir:      PathBuf,
    format:   LogFormat,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` (and parents) if needed.
    ///
    /// Each file is written and flushed by a single call, so a log with
    /// thousands of regions never holds more than one handle open.
    pub fn new(dir: &Path, format: LogFormat) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            format,
            finished: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create(&self, relative: &Path, header: &[&str]) -> OutputResult<Writer<File>> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        let path = self.dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut w = Writer::from_path(&path)?;
        w.write_record(header)?;
        tracing::debug!(path = %path.display(), "csv file opened");
        Ok(w)
    }

    fn check_format(&self, format: LogFormat) {
        if format != self.format {
            tracing::warn!(
                writer = %self.format,
                rows   = %format,
                "row format differs from writer format; using row format for headers"
            );
        }
    }
}

fn percent_record(row: &PercentRow, format: LogFormat) -> Vec<String> {
    let mut rec = vec![row.time.to_string()];
    rec.extend(row.values.values(format).iter().map(f64::to_string));
    rec
}

fn total_record(row: &TotalRow, format: LogFormat) -> Vec<String> {
    let mut rec = vec![row.time.to_string()];
    rec.extend(row.values.values(format).iter().map(i64::to_string));
    rec
}

impl OutputWriter for CsvWriter {
    fn write_populations(&mut self, populations: &InitialPopulation) -> OutputResult<()> {
        let mut w = self.create(Path::new("populations.csv"), &["region", "population"])?;
        for (region, population) in populations.iter() {
            let population = population.to_string();
            w.write_record([region.as_str(), population.as_str()])?;
        }
        w.flush()?;
        Ok(())
    }

    fn write_aggregate(&mut self, format: LogFormat, rows: &[AggregateRow]) -> OutputResult<()> {
        self.check_format(format);
        let header = AggregateRow::header(format);
        let mut w = self.create(Path::new("aggregate/aggregate_timeseries.csv"), &header)?;
        for row in rows {
            let mut rec = vec![row.time.to_string()];
            rec.extend(row.fractions.values(format).iter().map(f64::to_string));
            rec.push(row.checksum.to_string());
            w.write_record(&rec)?;
        }
        w.flush()?;
        Ok(())
    }

    fn write_region(&mut self, format: LogFormat, region: &RegionId, series: &RegionSeries) -> OutputResult<()> {
        self.check_format(format);
        let sub = PathBuf::from(format!("region_{region}"));

        let header = PercentRow::header(format);
        let mut w = self.create(&sub.join(format!("region_{region}_percentage_timeseries.csv")), &header)?;
        for row in &series.percents {
            w.write_record(percent_record(row, format))?;
        }
        w.flush()?;

        let header = TotalRow::header(format);
        let mut w = self.create(&sub.join(format!("region_{region}_totals_timeseries.csv")), &header)?;
        for row in &series.totals {
            w.write_record(total_record(row, format))?;
        }
        w.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        tracing::debug!(dir = %self.dir.display(), "csv writer finished");
        Ok(())
    }
}
