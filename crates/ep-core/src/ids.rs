//! Region identifier.
//!
//! Region ids are opaque strings lifted out of the log (`_<id>` tokens).
//! They are `Ord` so per-region maps iterate in a stable order, which keeps
//! every output sequence reproducible run over run.

use std::borrow::Borrow;
use std::fmt;

/// Key of one independently tracked sub-population.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RegionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `BTreeMap<RegionId, _>` be queried with a plain `&str`.
impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
