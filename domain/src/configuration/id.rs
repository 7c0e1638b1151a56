//! Configuration identifier value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a configuration descriptor (Value Object)
///
/// Unique within one controller's set and stable across releases, since it
/// is the value written to persistent storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(i64);

impl ConfigId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw persisted value
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ConfigId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ConfigId> for i64 {
    fn from(id: ConfigId) -> Self {
        id.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConfigId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
