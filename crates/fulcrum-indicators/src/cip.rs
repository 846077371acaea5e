//! Covered-interest-parity basis estimation.
//!
//! Cross-currency basis swap levels for the pairs we watch are not
//! directly observable without a market data terminal. When forward
//! points and spot are available the basis is computed from them; when
//! they are not (the common case), a calibrated proxy derives it from the
//! policy-rate differential. The two paths are distinct [`BasisInput`]
//! variants and the produced [`BasisEstimate`] always carries its
//! [`BasisMethod`], so callers can tell an actual CIP deviation from a
//! proxy and surface that to users.

use serde::{Deserialize, Serialize};

/// Calibration for the proxy basis estimate of one foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParams {
    /// Constant offset in basis points.
    pub base_offset_bps: f64,
    /// Sensitivity of the basis to the rate differential (bps per percent).
    pub rate_sensitivity: f64,
    /// Structural premium in basis points (persistent JPY funding
    /// distortion; unset for currencies without one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_premium_bps: Option<f64>,
}

impl CalibrationParams {
    /// Calibration without a structural premium.
    #[must_use]
    pub fn new(base_offset_bps: f64, rate_sensitivity: f64) -> Self {
        Self {
            base_offset_bps,
            rate_sensitivity,
            structural_premium_bps: None,
        }
    }

    /// Calibration with a structural premium.
    #[must_use]
    pub fn with_structural_premium(
        base_offset_bps: f64,
        rate_sensitivity: f64,
        premium_bps: f64,
    ) -> Self {
        Self {
            base_offset_bps,
            rate_sensitivity,
            structural_premium_bps: Some(premium_bps),
        }
    }
}

/// How a basis value was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasisMethod {
    /// Computed from observed forward points and spot.
    CipDeviationActual,
    /// Calibrated estimate from the policy-rate differential. An explicit,
    /// documented approximation - not a silent default.
    CipDeviationProxy,
    /// Administrative override, bypassing estimation entirely.
    ManualOverride,
}

impl BasisMethod {
    /// Stable kebab-case tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BasisMethod::CipDeviationActual => "cip-deviation-actual",
            BasisMethod::CipDeviationProxy => "cip-deviation-proxy",
            BasisMethod::ManualOverride => "manual-override",
        }
    }
}

/// A basis level in bps together with the method that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisEstimate {
    /// Basis swap level in basis points (negative = dollar premium).
    pub basis_bps: f64,
    /// How the value was produced.
    pub method: BasisMethod,
}

/// Input to basis estimation - either observed forward market data or the
/// calibrated fallback.
///
/// Modeled as a tagged union rather than a pile of optional fields so the
/// two computation paths and their accuracy metadata stay type-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BasisInput {
    /// Observed forward points and spot for the pair.
    ActualForward {
        /// Forward points in the spot's quote units.
        forward_points: f64,
        /// Spot exchange rate.
        spot: f64,
        /// Forward tenor in days (money-market 360-day convention).
        tenor_days: u32,
        /// USD rate minus foreign rate, in percent.
        rate_differential_pct: f64,
    },
    /// Calibrated proxy from the rate differential.
    CalibratedProxy {
        /// USD rate minus foreign rate, in percent.
        rate_differential_pct: f64,
        /// Per-currency calibration.
        calibration: CalibrationParams,
    },
}

/// Annualized forward premium in percent:
/// `(points / spot) x (360 / tenor days) x 100`.
///
/// `None` when spot or tenor is zero.
#[must_use]
pub fn forward_premium_annualized_pct(
    forward_points: f64,
    spot: f64,
    tenor_days: u32,
) -> Option<f64> {
    if spot == 0.0 || tenor_days == 0 {
        return None;
    }
    Some((forward_points / spot) * (360.0 / f64::from(tenor_days)) * 100.0)
}

/// USD rate minus foreign rate, in percent.
#[must_use]
pub fn rate_differential_pct(usd_rate_pct: Option<f64>, foreign_rate_pct: Option<f64>) -> Option<f64> {
    Some(usd_rate_pct? - foreign_rate_pct?)
}

/// Estimates the cross-currency basis in bps.
///
/// Actual path: `(annualized forward premium% - rate differential%) x 100`.
/// Proxy path: `base offset - rate differential x sensitivity
/// [+ structural premium]`, already in bps.
#[must_use]
pub fn estimate_basis(input: &BasisInput) -> Option<BasisEstimate> {
    match *input {
        BasisInput::ActualForward {
            forward_points,
            spot,
            tenor_days,
            rate_differential_pct,
        } => {
            let Some(premium_pct) = forward_premium_annualized_pct(forward_points, spot, tenor_days)
            else {
                log::debug!(
                    "degenerate forward inputs (spot {spot}, tenor {tenor_days}d); no basis"
                );
                return None;
            };
            Some(BasisEstimate {
                basis_bps: (premium_pct - rate_differential_pct) * 100.0,
                method: BasisMethod::CipDeviationActual,
            })
        }
        BasisInput::CalibratedProxy {
            rate_differential_pct,
            calibration,
        } => {
            let basis_bps = calibration.base_offset_bps
                - rate_differential_pct * calibration.rate_sensitivity
                + calibration.structural_premium_bps.unwrap_or(0.0);
            Some(BasisEstimate {
                basis_bps,
                method: BasisMethod::CipDeviationProxy,
            })
        }
    }
}

/// Total FX hedging cost in percent: the rate-based cost minus the
/// basis-swap-implied cost, `rate differential% - basis bps / 100`.
///
/// This is the hedge-cost input to the Japanese hedging spread.
#[must_use]
pub fn total_hedging_cost_pct(
    rate_differential_pct: Option<f64>,
    basis_bps: Option<f64>,
) -> Option<f64> {
    Some(rate_differential_pct? - basis_bps? / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_proxy_basis_eur_calibration() {
        // fed funds 5.25, ecb 3.00 -> differential 2.25
        // base -15, sensitivity 8 -> -15 - 18 = -33 bps
        let input = BasisInput::CalibratedProxy {
            rate_differential_pct: 2.25,
            calibration: CalibrationParams::new(-15.0, 8.0),
        };
        let estimate = estimate_basis(&input).unwrap();
        assert_relative_eq!(estimate.basis_bps, -33.0, max_relative = 1e-9);
        assert_eq!(estimate.method, BasisMethod::CipDeviationProxy);
    }

    #[test]
    fn test_proxy_basis_jpy_structural_premium() {
        // fed funds 5.25, boj 0.50 -> differential 4.75
        // -20 - 4.75*12 - 15 = -92 bps
        let input = BasisInput::CalibratedProxy {
            rate_differential_pct: 4.75,
            calibration: CalibrationParams::with_structural_premium(-20.0, 12.0, -15.0),
        };
        let estimate = estimate_basis(&input).unwrap();
        assert_relative_eq!(estimate.basis_bps, -92.0, max_relative = 1e-9);
    }

    #[test]
    fn test_actual_forward_basis() {
        // 3m USD/JPY: spot 150, points 1.70
        // premium = (1.70/150) * 4 * 100 = 4.5333%; diff 4.75%
        // basis = (4.5333 - 4.75) * 100 = -21.67 bps
        let input = BasisInput::ActualForward {
            forward_points: 1.70,
            spot: 150.0,
            tenor_days: 90,
            rate_differential_pct: 4.75,
        };
        let estimate = estimate_basis(&input).unwrap();
        assert_relative_eq!(estimate.basis_bps, -21.666_666, max_relative = 1e-6);
        assert_eq!(estimate.method, BasisMethod::CipDeviationActual);
    }

    #[test]
    fn test_degenerate_forward_inputs_are_none() {
        let zero_spot = BasisInput::ActualForward {
            forward_points: 1.70,
            spot: 0.0,
            tenor_days: 90,
            rate_differential_pct: 4.75,
        };
        assert_eq!(estimate_basis(&zero_spot), None);

        let zero_tenor = BasisInput::ActualForward {
            forward_points: 1.70,
            spot: 150.0,
            tenor_days: 0,
            rate_differential_pct: 4.75,
        };
        assert_eq!(estimate_basis(&zero_tenor), None);
    }

    #[test]
    fn test_rate_differential_null_propagation() {
        assert_eq!(rate_differential_pct(None, Some(0.5)), None);
        assert_eq!(rate_differential_pct(Some(5.25), None), None);
        assert_relative_eq!(
            rate_differential_pct(Some(5.25), Some(0.50)).unwrap(),
            4.75,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_total_hedging_cost() {
        // diff 4.75%, basis -92 bps -> 4.75 - (-0.92) = 5.67%
        let cost = total_hedging_cost_pct(Some(4.75), Some(-92.0)).unwrap();
        assert_relative_eq!(cost, 5.67, max_relative = 1e-9);

        assert_eq!(total_hedging_cost_pct(None, Some(-92.0)), None);
        assert_eq!(total_hedging_cost_pct(Some(4.75), None), None);
    }

    #[test]
    fn test_method_tags_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&BasisMethod::CipDeviationActual).unwrap(),
            "\"cip-deviation-actual\""
        );
        assert_eq!(BasisMethod::CipDeviationProxy.as_str(), "cip-deviation-proxy");
    }
}
