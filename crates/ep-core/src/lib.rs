//! `ep-core` — foundational types for the `epilog` pandemic log summarizer.
//!
//! This crate is a dependency of every other `ep-*` crate.  It has no
//! `ep-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `RegionId`                                                |
//! | [`time`]        | `TimeStep`                                                |
//! | [`format`]      | `LogFormat`, `Compartments<T>`, `ChecksumRule`            |
//! | [`row`]         | `AggregateRow`, `RegionRow<T>`, `PercentRow`, `TotalRow`  |
//! | [`config`]      | `ScanConfig`, `Priming`, `ScanMode`                       |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by the CLI to read `ScanConfig` from TOML.        |

pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod row;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Priming, ScanConfig, ScanMode};
pub use error::{CoreError, CoreResult};
pub use format::{ChecksumRule, Compartments, LogFormat};
pub use ids::RegionId;
pub use row::{AggregateRow, PercentRow, RegionRow, TotalRow};
pub use time::TimeStep;
