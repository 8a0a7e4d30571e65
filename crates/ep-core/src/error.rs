//! Core error type.
//!
//! `ep-scan` and `ep-output` define their own error enums; this one covers
//! decoding and configuration problems that are detectable without reading
//! a log.

use thiserror::Error;

use crate::LogFormat;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{format} state vector needs {expected} fields, got {got}")]
    FieldCount {
        format:   LogFormat,
        expected: usize,
        got:      usize,
    },

    #[error("{column} field is not a finite number ({value})")]
    NonFinite {
        column: &'static str,
        value:  f64,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ep-core`.
pub type CoreResult<T> = Result<T, CoreError>;
