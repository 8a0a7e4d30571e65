//! Scan configuration.
//!
//! Typically loaded from a TOML file by the CLI and passed to the scanner.
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! format             = "current"
//! emit_priming_steps = false
//! mode               = "both"
//! region_checksum    = "strict"
//! # global_checksum defaults to "loose" for legacy logs, "loose_all" for current
//! global_checksum    = "loose_all"
//!
//! [priming]
//! sentinel = 0
//! ```

use crate::{ChecksumRule, CoreError, CoreResult, LogFormat, TimeStep};

/// How the initial population of every region is established before
/// aggregation starts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Priming {
    /// Capture populations from every record logged before the first time
    /// marker greater than the given step.  Steps up to and including it
    /// form the priming section.
    Sentinel(TimeStep),
    /// Capture populations over the whole file.  There is no priming
    /// section; every step is emitted.
    FullScan,
}

impl Default for Priming {
    fn default() -> Self {
        Priming::Sentinel(TimeStep::ZERO)
    }
}

/// Which row families the scanner produces.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScanMode {
    /// Global population-weighted rows only.
    Aggregate,
    /// Per-region percent and totals rows only.
    Regions,
    #[default]
    Both,
}

impl ScanMode {
    #[inline]
    pub fn aggregate(self) -> bool {
        matches!(self, ScanMode::Aggregate | ScanMode::Both)
    }

    #[inline]
    pub fn regions(self) -> bool {
        matches!(self, ScanMode::Regions | ScanMode::Both)
    }
}

impl std::str::FromStr for ScanMode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregate" => Ok(ScanMode::Aggregate),
            "regions"   => Ok(ScanMode::Regions),
            "both"      => Ok(ScanMode::Both),
            other => Err(CoreError::Config(format!(
                "unknown scan mode {other:?}: expected \"aggregate\", \"regions\", or \"both\""
            ))),
        }
    }
}

/// Top-level configuration for one aggregation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// State vector layout of the log.
    pub format: LogFormat,

    /// Population priming strategy.  Default: sentinel at step 0.
    pub priming: Priming,

    /// Also emit rows for steps inside the priming section.
    pub emit_priming_steps: bool,

    /// Row families to produce.
    pub mode: ScanMode,

    /// Rule applied to every global row.  `None` picks
    /// [`ChecksumRule::global_default`] for `format`.
    pub global_checksum: Option<ChecksumRule>,

    /// Rule applied to every per-region row.  Default: `Strict`.
    pub region_checksum: ChecksumRule,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            format:             LogFormat::default(),
            priming:            Priming::default(),
            emit_priming_steps: false,
            mode:               ScanMode::default(),
            global_checksum:    None,
            region_checksum:    ChecksumRule::Strict,
        }
    }
}

impl ScanConfig {
    /// Reject option combinations that have no meaning.
    pub fn validate(&self) -> CoreResult<()> {
        if self.priming == Priming::FullScan && self.emit_priming_steps {
            return Err(CoreError::Config(
                "emit_priming_steps has no effect with full_scan priming".into(),
            ));
        }
        Ok(())
    }

    /// The global rule in effect: the configured one, else the format's
    /// default.
    pub fn global_rule(&self) -> ChecksumRule {
        self.global_checksum
            .unwrap_or_else(|| ChecksumRule::global_default(self.format))
    }

    /// `true` if `time` belongs to the priming section.
    #[inline]
    pub fn in_priming_section(&self, time: TimeStep) -> bool {
        match self.priming {
            Priming::Sentinel(through) => time <= through,
            Priming::FullScan          => false,
        }
    }

    /// `true` if rows for `time` should be produced.
    #[inline]
    pub fn emits(&self, time: TimeStep) -> bool {
        self.emit_priming_steps || !self.in_priming_section(time)
    }
}
