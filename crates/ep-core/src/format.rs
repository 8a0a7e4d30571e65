//! Log format versions, compartment vectors, and mass-conservation rules.
//!
//! # State vector layouts
//!
//! | Version   | Fields | Layout                                                  |
//! |-----------|--------|---------------------------------------------------------|
//! | `legacy`  | 9      | `pop, S, E, I, R, newE, newI, newR, D`                  |
//! | `current` | 11     | `pop, S, E, VD1, VD2, I, R, newE, newI, newR, D`        |
//!
//! `pop` is an absolute head count; every other field is a fraction of that
//! region's population.  Legacy vectors decode with `vd1 = vd2 = 0`.
//!
//! # Checksums
//!
//! | Rule     | Sum                       | Accepted band (inclusive) |
//! |----------|---------------------------|---------------------------|
//! | `loose`  | `S+E+I+R+D`               | `[0.95, 1.05]`            |
//! | `strict` | `S+E+VD1+VD2+I+R+D`       | `[0.995, 1.005]`          |
//!
//! The loose rule predates the vaccination compartments.  Both are kept and
//! selected explicitly through `ScanConfig`.

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── LogFormat ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LogFormat {
    /// SEIRD logs written before vaccination compartments existed.
    Legacy,
    /// SEVIRD logs with first- and second-dose compartments.
    #[default]
    Current,
}

impl LogFormat {
    /// Minimum number of comma-separated fields in a state payload.
    pub fn field_count(self) -> usize {
        match self {
            LogFormat::Legacy  => 9,
            LogFormat::Current => 11,
        }
    }

    /// Whether rows of this format carry the `VD1`/`VD2` columns.
    pub fn has_vaccination(self) -> bool {
        matches!(self, LogFormat::Current)
    }

    /// Split a raw state vector into its population field and compartments.
    ///
    /// Fails with [`CoreError::FieldCount`] if the vector is shorter than
    /// [`field_count`][Self::field_count], and with [`CoreError::NonFinite`]
    /// if any field of the layout is NaN or infinite.  Extra trailing fields
    /// are ignored.
    pub fn decode(self, fields: &[f64]) -> CoreResult<(f64, Compartments<f64>)> {
        let expected = self.field_count();
        if fields.len() < expected {
            return Err(CoreError::FieldCount { format: self, expected, got: fields.len() });
        }
        if let Some(pos) = fields[..expected].iter().position(|v| !v.is_finite()) {
            let column = match pos {
                0 => "population",
                n => Compartments::<f64>::columns(self)[n - 1],
            };
            return Err(CoreError::NonFinite { column, value: fields[pos] });
        }

        let c = match self {
            LogFormat::Legacy => Compartments {
                s:     fields[1],
                e:     fields[2],
                vd1:   0.0,
                vd2:   0.0,
                i:     fields[3],
                r:     fields[4],
                new_e: fields[5],
                new_i: fields[6],
                new_r: fields[7],
                d:     fields[8],
            },
            LogFormat::Current => Compartments {
                s:     fields[1],
                e:     fields[2],
                vd1:   fields[3],
                vd2:   fields[4],
                i:     fields[5],
                r:     fields[6],
                new_e: fields[7],
                new_i: fields[8],
                new_r: fields[9],
                d:     fields[10],
            },
        };
        Ok((fields[0], c))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Legacy  => "legacy",
            LogFormat::Current => "current",
        })
    }
}

impl FromStr for LogFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "seird"    => Ok(LogFormat::Legacy),
            "current" | "sevirds" => Ok(LogFormat::Current),
            other => Err(CoreError::Config(format!(
                "unknown log format {other:?}: expected \"legacy\" or \"current\""
            ))),
        }
    }
}

// ── Compartments ──────────────────────────────────────────────────────────────

/// One value per compartment, plus the three daily-change fields.
///
/// `T = f64` holds fractions; `T = i64` holds rounded person counts.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compartments<T> {
    pub s:     T,
    pub e:     T,
    pub vd1:   T,
    pub vd2:   T,
    pub i:     T,
    pub r:     T,
    pub new_e: T,
    pub new_i: T,
    pub new_r: T,
    pub d:     T,
}

impl<T> Compartments<T> {
    /// Apply `f` to every field, preserving positions.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Compartments<U> {
        Compartments {
            s:     f(self.s),
            e:     f(self.e),
            vd1:   f(self.vd1),
            vd2:   f(self.vd2),
            i:     f(self.i),
            r:     f(self.r),
            new_e: f(self.new_e),
            new_i: f(self.new_i),
            new_r: f(self.new_r),
            d:     f(self.d),
        }
    }

    /// Column headers in output order for `format` (time column excluded).
    pub fn columns(format: LogFormat) -> Vec<&'static str> {
        let mut cols = vec!["S", "E"];
        if format.has_vaccination() {
            cols.extend(["VD1", "VD2"]);
        }
        cols.extend(["I", "R", "New_E", "New_I", "New_R", "D"]);
        cols
    }
}

impl<T: Copy> Compartments<T> {
    /// Values in the same order as [`columns`][Self::columns].
    pub fn values(&self, format: LogFormat) -> Vec<T> {
        let mut vals = vec![self.s, self.e];
        if format.has_vaccination() {
            vals.extend([self.vd1, self.vd2]);
        }
        vals.extend([self.i, self.r, self.new_e, self.new_i, self.new_r, self.d]);
        vals
    }
}

impl Compartments<i64> {
    /// Field-wise `checked_add`; `None` if any count overflows.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Compartments {
            s:     self.s.checked_add(rhs.s)?,
            e:     self.e.checked_add(rhs.e)?,
            vd1:   self.vd1.checked_add(rhs.vd1)?,
            vd2:   self.vd2.checked_add(rhs.vd2)?,
            i:     self.i.checked_add(rhs.i)?,
            r:     self.r.checked_add(rhs.r)?,
            new_e: self.new_e.checked_add(rhs.new_e)?,
            new_i: self.new_i.checked_add(rhs.new_i)?,
            new_r: self.new_r.checked_add(rhs.new_r)?,
            d:     self.d.checked_add(rhs.d)?,
        })
    }

    /// Divide every count by `total` to recover fractions.
    pub fn to_fractions(self, total: f64) -> Compartments<f64> {
        self.map(|n| n as f64 / total)
    }
}

impl Compartments<f64> {
    /// Scale every fraction by `population` and round to whole persons
    /// (ties to even).
    pub fn to_counts(self, population: f64) -> Compartments<i64> {
        self.map(|frac| (population * frac).round_ties_even() as i64)
    }
}

impl<T: AddAssign> AddAssign for Compartments<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.s     += rhs.s;
        self.e     += rhs.e;
        self.vd1   += rhs.vd1;
        self.vd2   += rhs.vd2;
        self.i     += rhs.i;
        self.r     += rhs.r;
        self.new_e += rhs.new_e;
        self.new_i += rhs.new_i;
        self.new_r += rhs.new_r;
        self.d     += rhs.d;
    }
}

// ── ChecksumRule ──────────────────────────────────────────────────────────────

/// Which compartments are summed and which band the sum must fall in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChecksumRule {
    /// `S+E+I+R+D` within `[0.95, 1.05]`.
    Loose,
    /// `S+E+VD1+VD2+I+R+D` within `[0.95, 1.05]`.
    LooseAll,
    /// `S+E+VD1+VD2+I+R+D` within `[0.995, 1.005]`.
    Strict,
}

impl ChecksumRule {
    /// Global rule used when none is configured.
    ///
    /// Current-format `S` excludes vaccinated susceptibles, so the sum has
    /// to include `VD1`/`VD2` to reach one.
    pub fn global_default(format: LogFormat) -> Self {
        match format {
            LogFormat::Legacy  => ChecksumRule::Loose,
            LogFormat::Current => ChecksumRule::LooseAll,
        }
    }

    /// Inclusive `(min, max)` bounds.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            ChecksumRule::Loose | ChecksumRule::LooseAll => (0.95, 1.05),
            ChecksumRule::Strict                         => (0.995, 1.005),
        }
    }

    pub fn sum(self, c: &Compartments<f64>) -> f64 {
        let base = c.s + c.e + c.i + c.r + c.d;
        match self {
            ChecksumRule::Loose                           => base,
            ChecksumRule::LooseAll | ChecksumRule::Strict => base + c.vd1 + c.vd2,
        }
    }

    /// `true` if `sum` lies inside the band.  NaN never does.
    pub fn accepts(self, sum: f64) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&sum)
    }
}

impl fmt::Display for ChecksumRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChecksumRule::Loose    => "loose",
            ChecksumRule::LooseAll => "loose_all",
            ChecksumRule::Strict   => "strict",
        })
    }
}
