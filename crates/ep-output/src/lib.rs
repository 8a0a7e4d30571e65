//! `ep-output` — writers for finished epilog scans.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend | Files created                                              |
//! |-----------|---------|------------------------------------------------------------|
//! | *(none)*  | CSV     | `populations.csv`, `aggregate/`, one `region_<id>/` each   |
//! | `sqlite`  | SQLite  | `output.db`                                                |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`write_output`], which is only ever handed a [`ScanOutput`] from a scan
//! that finished without error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ep_output::{CsvWriter, OutputWriter, write_output};
//!
//! let output = scanner.scan_path(&log, &mut NoopObserver)?;
//! let mut writer = CsvWriter::new(Path::new("logs/stats"), output.format)?;
//! write_output(&mut writer, &output)?;
//! writer.finish()?;
//! ```
//!
//! [`ScanOutput`]: ep_scan::ScanOutput

pub mod csv;
pub mod error;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use writer::{OutputWriter, write_output};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
