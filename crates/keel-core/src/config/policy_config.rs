use serde::{Deserialize, Serialize};

use crate::errors::{KeelError, KeelResult};
use crate::event::Role;
use crate::score::{TrustLevel, Window};

use super::defaults;

/// Threshold for entering one level band. A band is reached when, over its
/// window, the negative-event count meets `min_negative_events` OR the
/// negative rate meets `min_negative_rate` (whichever thresholds are set),
/// AND the distinct-counterpart count meets `min_unique_counterparts` when
/// that is set.
///
/// The engine additionally enforces a hard floor of two qualifying negative
/// events in the band's window before any promotion, so no configuration can
/// make a single incident move an actor away from level 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionBand {
    /// Trailing window the band reads. Must map to one of the day-windows
    /// (30, 90, or 180).
    pub window_days: u32,
    pub min_negative_events: Option<u64>,
    pub min_negative_rate: Option<f64>,
    pub min_unique_counterparts: Option<u64>,
}

/// Per-role transition policy: the three promotion bands (into levels 1, 2,
/// and 3) and the recovery streak length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolePolicy {
    pub bands: [PromotionBand; 3],
    /// Consecutive completions required for a one-level decrease.
    pub recovery_streak: u64,
}

impl RolePolicy {
    /// The band guarding promotion into `target_level` (1-based: bands[0]
    /// guards level 1).
    pub fn band_for(&self, target_level: TrustLevel) -> Option<&PromotionBand> {
        match target_level.as_i64() {
            1 => Some(&self.bands[0]),
            2 => Some(&self.bands[1]),
            3 => Some(&self.bands[2]),
            _ => None,
        }
    }

    fn requester_default() -> Self {
        Self {
            bands: [
                PromotionBand {
                    window_days: defaults::REQUESTER_L1_WINDOW_DAYS,
                    min_negative_events: Some(defaults::REQUESTER_L1_MIN_EVENTS),
                    min_negative_rate: Some(defaults::REQUESTER_L1_MIN_RATE),
                    min_unique_counterparts: None,
                },
                PromotionBand {
                    window_days: defaults::REQUESTER_L2_WINDOW_DAYS,
                    min_negative_events: Some(defaults::REQUESTER_L2_MIN_EVENTS),
                    min_negative_rate: None,
                    min_unique_counterparts: None,
                },
                PromotionBand {
                    window_days: defaults::REQUESTER_L3_WINDOW_DAYS,
                    min_negative_events: Some(defaults::REQUESTER_L3_MIN_EVENTS),
                    min_negative_rate: None,
                    min_unique_counterparts: Some(defaults::REQUESTER_L3_MIN_COUNTERPARTS),
                },
            ],
            recovery_streak: defaults::REQUESTER_RECOVERY_STREAK,
        }
    }

    fn fulfiller_default() -> Self {
        Self {
            bands: [
                PromotionBand {
                    window_days: defaults::FULFILLER_L1_WINDOW_DAYS,
                    min_negative_events: Some(defaults::FULFILLER_L1_MIN_EVENTS),
                    min_negative_rate: Some(defaults::FULFILLER_L1_MIN_RATE),
                    min_unique_counterparts: None,
                },
                PromotionBand {
                    window_days: defaults::FULFILLER_L2_WINDOW_DAYS,
                    min_negative_events: None,
                    min_negative_rate: Some(defaults::FULFILLER_L2_MIN_RATE),
                    min_unique_counterparts: None,
                },
                PromotionBand {
                    window_days: defaults::FULFILLER_L3_WINDOW_DAYS,
                    min_negative_events: None,
                    min_negative_rate: Some(defaults::FULFILLER_L3_MIN_RATE),
                    min_unique_counterparts: Some(defaults::FULFILLER_L3_MIN_COUNTERPARTS),
                },
            ],
            recovery_streak: defaults::FULFILLER_RECOVERY_STREAK,
        }
    }
}

/// Transition policy for both roles. Thresholds are product policy, kept out
/// of the engine as data; the defaults encode the launch values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub requester: RolePolicy,
    pub fulfiller: RolePolicy,
}

impl PolicyConfig {
    /// The policy for one role.
    pub fn role(&self, role: Role) -> &RolePolicy {
        match role {
            Role::Requester => &self.requester,
            Role::Fulfiller => &self.fulfiller,
        }
    }

    /// Reject configurations the transition engine cannot evaluate sanely:
    /// bands must read a defined day-window, carry at least one count/rate
    /// threshold, and nest monotonically (a higher band never easier to
    /// reach than a lower one).
    pub fn validate(&self) -> KeelResult<()> {
        for (role, policy) in [
            (Role::Requester, &self.requester),
            (Role::Fulfiller, &self.fulfiller),
        ] {
            if policy.recovery_streak == 0 {
                return Err(KeelError::ConfigError(format!(
                    "{role} recovery_streak must be at least 1"
                )));
            }
            for (i, band) in policy.bands.iter().enumerate() {
                let level = i + 1;
                if Window::from_days(band.window_days).is_none() {
                    return Err(KeelError::ConfigError(format!(
                        "{role} band {level}: window_days {} is not one of the day-windows",
                        band.window_days
                    )));
                }
                if band.min_negative_events.is_none() && band.min_negative_rate.is_none() {
                    return Err(KeelError::ConfigError(format!(
                        "{role} band {level}: needs a count or rate threshold"
                    )));
                }
                if let Some(rate) = band.min_negative_rate {
                    if !(0.0..=1.0).contains(&rate) {
                        return Err(KeelError::ConfigError(format!(
                            "{role} band {level}: rate {rate} outside [0, 1]"
                        )));
                    }
                }
            }
            for pair in policy.bands.windows(2) {
                let (lower, upper) = (&pair[0], &pair[1]);
                if let (Some(a), Some(b)) = (lower.min_negative_events, upper.min_negative_events) {
                    if b < a {
                        return Err(KeelError::ConfigError(format!(
                            "{role} bands are not nested: count threshold drops from {a} to {b}"
                        )));
                    }
                }
                if let (Some(a), Some(b)) = (lower.min_negative_rate, upper.min_negative_rate) {
                    if b < a {
                        return Err(KeelError::ConfigError(format!(
                            "{role} bands are not nested: rate threshold drops from {a} to {b}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            requester: RolePolicy::requester_default(),
            fulfiller: RolePolicy::fulfiller_default(),
        }
    }
}
