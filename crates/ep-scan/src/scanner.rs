//! The `LogScanner` driver and its two passes.
//!
//! # Passes
//!
//! ```text
//! pass 1 (priming):   time markers + state records → InitialPopulation
//!                     stops at the first marker > sentinel (or at EOF
//!                     with full_scan priming)
//! rewind
//! pass 2 (aggregate): for each line:
//!   time marker   → flush the table at the current time, advance time
//!   state record  → overwrite the region's vector in the table
//!   anything else → skip
//! EOF                → flush the table at the current time
//! ```
//!
//! Every region's population has to be known before any global percentage
//! can be computed, which is why priming is a separate pass.  Rows are
//! collected in memory and only returned once the whole log has been
//! aggregated without error.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek, SeekFrom};
use std::ops::ControlFlow;
use std::path::Path;

use ep_core::{Priming, RegionId, ScanConfig, TimeStep};

use crate::aggregate::Aggregator;
use crate::classifier::{LineKind, classify};
use crate::observer::{NoopObserver, ScanObserver};
use crate::series::ScanOutput;
use crate::table::{InitialPopulation, RegionStateTable};
use crate::{ScanError, ScanResult};

// ── LogScanner ────────────────────────────────────────────────────────────────

/// Streams a simulator log and produces validated per-step rows.
///
/// A scanner holds only its configuration; all run state lives inside one
/// call to [`scan`][Self::scan], so one scanner can process many logs.
#[derive(Debug, Clone)]
pub struct LogScanner {
    config:     ScanConfig,
    aggregator: Aggregator,
}

impl LogScanner {
    /// Validate `config` and build a scanner.
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        config.validate()?;
        let aggregator = Aggregator::from_config(&config);
        Ok(Self { config, aggregator })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the log at `path`.
    pub fn scan_path<O: ScanObserver>(&self, path: &Path, observer: &mut O) -> ScanResult<ScanOutput> {
        let file = File::open(path)?;
        self.scan(BufReader::new(file), observer)
    }

    /// Scan an in-memory log without observer callbacks.
    pub fn scan_str(&self, log: &str) -> ScanResult<ScanOutput> {
        self.scan(Cursor::new(log.as_bytes()), &mut NoopObserver)
    }

    /// Prime populations, rewind `reader`, and aggregate every step.
    pub fn scan<R, O>(&self, mut reader: R, observer: &mut O) -> ScanResult<ScanOutput>
    where
        R: BufRead + Seek,
        O: ScanObserver,
    {
        let populations = self.prime(&mut reader)?;
        tracing::info!(
            regions          = populations.len(),
            total_population = populations.total(),
            "priming complete"
        );
        observer.on_priming_done(&populations);

        reader.seek(SeekFrom::Start(0))?;

        let mut pass = AggregatePass::new(self, populations, observer);
        for_each_line(&mut reader, |line_no, line| {
            pass.line(line_no, line)?;
            Ok(ControlFlow::Continue(()))
        })?;
        let output = pass.finish()?;

        tracing::info!(
            steps   = output.steps.len(),
            regions = output.populations.len(),
            "scan complete"
        );
        observer.on_scan_end(&output);
        Ok(output)
    }

    // ── Pass 1 ────────────────────────────────────────────────────────────

    fn prime<R: BufRead>(&self, reader: R) -> ScanResult<InitialPopulation> {
        let mut populations = InitialPopulation::new();
        let mut current: Option<TimeStep> = None;

        for_each_line(reader, |_, line| {
            match classify(line, current) {
                LineKind::TimeMarker(t) => {
                    if let Priming::Sentinel(through) = self.config.priming {
                        if t > through {
                            return Ok(ControlFlow::Break(()));
                        }
                    }
                    current = Some(t);
                }
                LineKind::StateRecord { region, fields } => {
                    if let Some(&population) = fields.first() {
                        populations.capture(region, population)?;
                    }
                }
                LineKind::Unrecognized => {}
            }
            Ok(ControlFlow::Continue(()))
        })?;

        Ok(populations)
    }
}

// ── Pass 2 ────────────────────────────────────────────────────────────────────

/// Accumulate/flush state machine for the aggregation pass.
struct AggregatePass<'a, O: ScanObserver> {
    scanner:      &'a LogScanner,
    observer:     &'a mut O,
    table:        RegionStateTable,
    current:      Option<TimeStep>,
    output:       ScanOutput,
    warned_extra: bool,
}

impl<'a, O: ScanObserver> AggregatePass<'a, O> {
    fn new(scanner: &'a LogScanner, populations: InitialPopulation, observer: &'a mut O) -> Self {
        Self {
            scanner,
            observer,
            table:        RegionStateTable::new(),
            current:      None,
            output:       ScanOutput::new(scanner.config.format, populations),
            warned_extra: false,
        }
    }

    fn line(&mut self, line_no: usize, line: &str) -> ScanResult<()> {
        match classify(line, self.current) {
            LineKind::TimeMarker(t) => self.on_marker(line_no, t),
            LineKind::StateRecord { region, fields } => self.on_record(line_no, region, fields),
            LineKind::Unrecognized => {
                tracing::trace!(line = line_no, "unrecognized line skipped");
                Ok(())
            }
        }
    }

    fn on_marker(&mut self, line_no: usize, t: TimeStep) -> ScanResult<()> {
        if let Some(previous) = self.current {
            if t < previous {
                return Err(ScanError::TimeRegression { previous, found: t, line: line_no });
            }
            self.flush(previous)?;
        }
        self.current = Some(t);
        Ok(())
    }

    fn on_record(&mut self, line_no: usize, region: &str, fields: Vec<f64>) -> ScanResult<()> {
        let Some(time) = self.current else {
            return Err(ScanError::RecordBeforeTime {
                line:   line_no,
                region: RegionId::from(region),
            });
        };
        self.output.populations.require(time, region)?;

        let expected = self.scanner.config.format.field_count();
        if fields.len() > expected && !self.warned_extra {
            self.warned_extra = true;
            tracing::warn!(
                line     = line_no,
                region,
                expected,
                got      = fields.len(),
                format   = %self.scanner.config.format,
                "state vector longer than the log format layout; extra fields ignored"
            );
        }

        self.table.observe(region, fields);
        Ok(())
    }

    /// Finalize the table at `time` into rows.
    fn flush(&mut self, time: TimeStep) -> ScanResult<()> {
        if self.table.is_empty() {
            return Ok(());
        }
        let scanner = self.scanner;
        let config = &scanner.config;
        if !config.emits(time) {
            tracing::debug!(%time, "priming step not emitted");
            return Ok(());
        }

        let aggregator = &scanner.aggregator;
        let snapshot = self.table.snapshot();

        if config.mode.aggregate() {
            let row = aggregator.aggregate_global(time, snapshot, &self.output.populations)?;
            self.output.aggregate.push(row);
        }

        if config.mode.regions() {
            for (region, fields) in snapshot {
                let population = self.output.populations.require(time, region.as_str())?;
                let (percent, total) = aggregator.aggregate_region(time, region, fields, population)?;
                self.output
                    .regions
                    .entry(region.clone())
                    .or_default()
                    .push(percent, total);
            }
        }

        self.output.steps.push(time);
        tracing::debug!(%time, regions = snapshot.len(), "step aggregated");
        self.observer.on_step(time, snapshot.len());
        Ok(())
    }

    /// Flush the last step, even without a trailing time marker.
    fn finish(mut self) -> ScanResult<ScanOutput> {
        if let Some(time) = self.current {
            self.flush(time)?;
        }
        Ok(self.output)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Feed every line of `reader` (1-based line number, trimmed text) to `f`.
///
/// Invalid UTF-8 is replaced rather than rejected; such lines simply fail
/// to classify.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> ScanResult<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> ScanResult<ControlFlow<()>>,
{
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let text = String::from_utf8_lossy(&buf);
        if f(line_no, text.trim())?.is_break() {
            break;
        }
    }
    Ok(())
}
