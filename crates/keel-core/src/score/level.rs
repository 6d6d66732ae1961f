use std::fmt;

use serde::{Deserialize, Serialize};

/// Trust level ladder, four states, no terminal state. Level 3 is always
/// recoverable through the completion streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// 0: normal standing, no restrictions.
    Good,
    /// 1: advisory; the actor sees warnings and confirmation prompts.
    Advisory,
    /// 2: elevated risk; role-specific requirements kick in.
    Risk,
    /// 3: highest band; the most restrictive eligibility rules apply.
    HighRisk,
}

impl TrustLevel {
    /// Numeric form persisted in the `trust_level` column.
    pub fn as_i64(self) -> i64 {
        match self {
            TrustLevel::Good => 0,
            TrustLevel::Advisory => 1,
            TrustLevel::Risk => 2,
            TrustLevel::HighRisk => 3,
        }
    }

    /// Parse the persisted numeric form. Values outside 0–3 map to `None`.
    pub fn from_i64(value: i64) -> Option<TrustLevel> {
        match value {
            0 => Some(TrustLevel::Good),
            1 => Some(TrustLevel::Advisory),
            2 => Some(TrustLevel::Risk),
            3 => Some(TrustLevel::HighRisk),
            _ => None,
        }
    }

    /// One step up the ladder, capped at `HighRisk`.
    pub fn promote(self) -> TrustLevel {
        match self {
            TrustLevel::Good => TrustLevel::Advisory,
            TrustLevel::Advisory => TrustLevel::Risk,
            TrustLevel::Risk | TrustLevel::HighRisk => TrustLevel::HighRisk,
        }
    }

    /// One step down the ladder, floored at `Good`.
    pub fn demote(self) -> TrustLevel {
        match self {
            TrustLevel::HighRisk => TrustLevel::Risk,
            TrustLevel::Risk => TrustLevel::Advisory,
            TrustLevel::Advisory | TrustLevel::Good => TrustLevel::Good,
        }
    }

    /// The next level up, if there is one.
    pub fn next_up(self) -> Option<TrustLevel> {
        match self {
            TrustLevel::HighRisk => None,
            other => Some(other.promote()),
        }
    }
}

impl Default for TrustLevel {
    fn default() -> Self {
        TrustLevel::Good
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}
