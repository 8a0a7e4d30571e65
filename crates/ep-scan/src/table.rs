//! Region State Table and captured initial populations.
//!
//! Both maps are `BTreeMap`s keyed by [`RegionId`] so every snapshot, and
//! therefore every output sequence, iterates regions in the same order.

use std::collections::BTreeMap;

use ep_core::{RegionId, TimeStep};

use crate::{ScanError, ScanResult};

/// Read-only view of the latest state vector per region.
pub type RegionSnapshot = BTreeMap<RegionId, Vec<f64>>;

// ── RegionStateTable ──────────────────────────────────────────────────────────

/// Latest observed state vector for every region seen so far.
///
/// Observations replace the stored vector.  Entries are never removed, so a
/// region that is not re-logged at a step keeps contributing its previous
/// state to that step's rows.
#[derive(Debug, Clone, Default)]
pub struct RegionStateTable {
    states: RegionSnapshot,
}

impl RegionStateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored vector for `region`.
    pub fn observe(&mut self, region: &str, fields: Vec<f64>) {
        match self.states.get_mut(region) {
            Some(slot) => *slot = fields,
            None => {
                self.states.insert(RegionId::from(region), fields);
            }
        }
    }

    pub fn snapshot(&self) -> &RegionSnapshot {
        &self.states
    }

    pub fn known_regions(&self) -> impl Iterator<Item = &RegionId> {
        self.states.keys()
    }

    pub fn get(&self, region: &str) -> Option<&[f64]> {
        self.states.get(region).map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

// ── InitialPopulation ─────────────────────────────────────────────────────────

/// Population of each region at its first observation during priming.
///
/// Used as the divisor for global percentages and as the multiplier for
/// per-region totals.  Once captured, a region's value never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialPopulation {
    by_region: BTreeMap<RegionId, f64>,
}

impl InitialPopulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `population` for `region` unless one is already captured.
    ///
    /// Returns `true` if this call captured the value.  Negative, NaN, and
    /// infinite populations are rejected.
    pub fn capture(&mut self, region: &str, population: f64) -> ScanResult<bool> {
        if !population.is_finite() || population < 0.0 {
            return Err(ScanError::InvalidPopulation {
                region: RegionId::from(region),
                value:  population,
            });
        }
        if self.by_region.contains_key(region) {
            return Ok(false);
        }
        self.by_region.insert(RegionId::from(region), population);
        Ok(true)
    }

    pub fn get(&self, region: &str) -> Option<f64> {
        self.by_region.get(region).copied()
    }

    /// Like [`get`][Self::get] but fails with `MissingPopulation` at `time`.
    pub fn require(&self, time: TimeStep, region: &str) -> ScanResult<f64> {
        self.get(region).ok_or_else(|| ScanError::MissingPopulation {
            time,
            region: RegionId::from(region),
        })
    }

    /// Sum of all captured populations.
    pub fn total(&self) -> f64 {
        self.by_region.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, f64)> {
        self.by_region.iter().map(|(id, &pop)| (id, pop))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_region.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_region.is_empty()
    }
}
