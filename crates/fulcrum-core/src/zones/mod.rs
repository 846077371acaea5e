//! Zone classification.
//!
//! Two threshold shapes exist and are semantically different:
//!
//! - [`ThresholdSet`]: one optional `[min, max)` band per zone, evaluated
//!   in fixed priority order critical → danger → warning → normal, first
//!   match wins. Used for the five core indicators.
//! - [`LadderThresholds`]: a flat ascending ladder (`critical >= danger >=
//!   warning`, else normal). Used for secondary indicators such as VIX and
//!   the high-yield spread.
//!
//! A missing value short-circuits to [`Zone::Unknown`] before any band
//! check; a configuration gap that no band covers falls back to
//! [`Zone::Normal`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Discrete risk classification for an indicator value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Within normal range.
    Normal,
    /// Elevated, worth watching.
    Warning,
    /// Adverse, historically associated with stress.
    Danger,
    /// Extreme, crisis-consistent.
    Critical,
    /// No observation available.
    Unknown,
}

/// Zone evaluation priority. First match wins.
///
/// Kept as an explicit ordered constant so the evaluation order can never
/// degrade into incidental map iteration order.
pub const ZONE_PRIORITY: [Zone; 4] = [Zone::Critical, Zone::Danger, Zone::Warning, Zone::Normal];

impl Zone {
    /// Canonical display color.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Zone::Normal => "green",
            Zone::Warning => "yellow",
            Zone::Danger => "orange",
            Zone::Critical => "red",
            Zone::Unknown => "gray",
        }
    }

    /// Canonical description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Zone::Normal => "Within normal range",
            Zone::Warning => "Elevated - monitor closely",
            Zone::Danger => "Adverse - stress building",
            Zone::Critical => "Extreme - crisis territory",
            Zone::Unknown => "No data available",
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Normal => "normal",
            Zone::Warning => "warning",
            Zone::Danger => "danger",
            Zone::Critical => "critical",
            Zone::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A half-open `[min, max)` membership band in the indicator's native unit.
///
/// At least one bound must be set; a band with neither bound matches
/// everything and is rejected at validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ThresholdBand {
    /// Band with both bounds: `min <= value < max`.
    #[must_use]
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Band with a lower bound only: `value >= min`.
    #[must_use]
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Band with an upper bound only: `value < max`.
    #[must_use]
    pub fn below(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Membership test: `[min, max)`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => value >= min && value < max,
            (Some(min), None) => value >= min,
            (None, Some(max)) => value < max,
            (None, None) => false,
        }
    }

    /// Rejects bands with neither bound or non-finite bounds.
    pub fn validate(&self, zone: Zone) -> CoreResult<()> {
        if self.min.is_none() && self.max.is_none() {
            return Err(CoreError::EmptyBand {
                zone: zone.as_str().to_string(),
            });
        }
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(CoreError::NonFiniteBound {
                    zone: zone.as_str().to_string(),
                    value: bound,
                });
            }
        }
        Ok(())
    }
}

/// Banded thresholds for one indicator: an optional band per zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// Band for the normal zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<ThresholdBand>,
    /// Band for the warning zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<ThresholdBand>,
    /// Band for the danger zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger: Option<ThresholdBand>,
    /// Band for the critical zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<ThresholdBand>,
}

impl ThresholdSet {
    /// The band configured for `zone`, if any.
    #[must_use]
    pub fn band(&self, zone: Zone) -> Option<&ThresholdBand> {
        match zone {
            Zone::Normal => self.normal.as_ref(),
            Zone::Warning => self.warning.as_ref(),
            Zone::Danger => self.danger.as_ref(),
            Zone::Critical => self.critical.as_ref(),
            Zone::Unknown => None,
        }
    }

    /// Validates every configured band.
    pub fn validate(&self) -> CoreResult<()> {
        for zone in ZONE_PRIORITY {
            if let Some(band) = self.band(zone) {
                band.validate(zone)?;
            }
        }
        Ok(())
    }

    /// Returns a set where bands present in `overrides` replace this set's
    /// bands zone by zone. Neither input is mutated.
    #[must_use]
    pub fn merged(&self, overrides: &ThresholdSet) -> ThresholdSet {
        ThresholdSet {
            normal: overrides.normal.or(self.normal),
            warning: overrides.warning.or(self.warning),
            danger: overrides.danger.or(self.danger),
            critical: overrides.critical.or(self.critical),
        }
    }
}

/// Flat ascending cutoffs for secondary indicators.
///
/// `value >= critical` is critical, `>= danger` is danger, `>= warning` is
/// warning, anything below is normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderThresholds {
    /// Warning cutoff.
    pub warning: f64,
    /// Danger cutoff.
    pub danger: f64,
    /// Critical cutoff.
    pub critical: f64,
}

impl LadderThresholds {
    /// Creates a ladder, rejecting out-of-order cutoffs.
    pub fn new(warning: f64, danger: f64, critical: f64) -> CoreResult<Self> {
        if !(warning <= danger && danger <= critical) {
            return Err(CoreError::LadderOutOfOrder {
                warning,
                danger,
                critical,
            });
        }
        Ok(Self {
            warning,
            danger,
            critical,
        })
    }
}

/// Result of classifying a value against thresholds.
///
/// Output-only: callers serialize it straight to their wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneResult {
    /// The classified zone.
    pub zone: Zone,
    /// Canonical display color for the zone.
    pub color: &'static str,
    /// Canonical description of the zone.
    pub description: &'static str,
}

impl ZoneResult {
    fn of(zone: Zone) -> Self {
        Self {
            zone,
            color: zone.color(),
            description: zone.description(),
        }
    }
}

/// Classifies a value against banded thresholds.
///
/// Zones are checked in [`ZONE_PRIORITY`] order and the first matching band
/// wins. A `None` value short-circuits to `Unknown`; a value no band covers
/// defaults to `Normal`. Side-effect free, never panics.
#[must_use]
pub fn evaluate_zone(value: Option<f64>, thresholds: &ThresholdSet) -> ZoneResult {
    let Some(value) = value else {
        return ZoneResult::of(Zone::Unknown);
    };
    if value.is_nan() {
        return ZoneResult::of(Zone::Unknown);
    }
    for zone in ZONE_PRIORITY {
        if let Some(band) = thresholds.band(zone) {
            if band.contains(value) {
                return ZoneResult::of(zone);
            }
        }
    }
    ZoneResult::of(Zone::Normal)
}

/// Classifies a value against a flat ascending ladder.
#[must_use]
pub fn evaluate_ladder(value: Option<f64>, ladder: &LadderThresholds) -> ZoneResult {
    let Some(value) = value else {
        return ZoneResult::of(Zone::Unknown);
    };
    if value.is_nan() {
        return ZoneResult::of(Zone::Unknown);
    }
    let zone = if value >= ladder.critical {
        Zone::Critical
    } else if value >= ladder.danger {
        Zone::Danger
    } else if value >= ladder.warning {
        Zone::Warning
    } else {
        Zone::Normal
    };
    ZoneResult::of(zone)
}
