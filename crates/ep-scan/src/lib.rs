//! `ep-scan` — turns a simulator state log into validated per-step rows.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`classifier`] | `classify`, `LineKind` (time marker / state record / skip) |
//! | [`table`]      | `RegionStateTable`, `InitialPopulation`, `RegionSnapshot`  |
//! | [`aggregate`]  | `Aggregator::aggregate_global`, `aggregate_region`         |
//! | [`scanner`]    | `LogScanner` (priming pass + aggregation pass)             |
//! | [`series`]     | `ScanOutput`, `RegionSeries`                               |
//! | [`observer`]   | `ScanObserver` trait, `NoopObserver`                       |
//! | [`error`]      | `ScanError`, `RowScope`, `ScanResult<T>`                   |
//!
//! # Data flow
//!
//! ```text
//! log lines → classify → RegionStateTable → (time boundary) Aggregator
//!           → ScanOutput { aggregate rows, per-region rows, populations }
//! ```
//!
//! The engine is single-threaded and synchronous: the log is an ordered
//! sequence and aggregation is a fold over it.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ep_core::ScanConfig;
//! use ep_scan::{LogScanner, NoopObserver};
//!
//! let scanner = LogScanner::new(ScanConfig::default())?;
//! let output = scanner.scan_path(Path::new("logs/pandemic_state.txt"), &mut NoopObserver)?;
//! for row in &output.aggregate {
//!     println!("{} {:.4}", row.time, row.fractions.i);
//! }
//! ```

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod observer;
pub mod scanner;
pub mod series;
pub mod table;


pub use aggregate::Aggregator;
pub use classifier::{LineKind, classify};
pub use error::{RowScope, ScanError, ScanResult};
pub use observer::{NoopObserver, ScanObserver};
pub use scanner::LogScanner;
pub use series::{RegionSeries, ScanOutput};
pub use table::{InitialPopulation, RegionSnapshot, RegionStateTable};
