//! The monitoring engine.
//!
//! `MonitorEngine` owns the process-wide mutable state the calculation
//! core depends on: policy rates, per-currency basis calibrations, and
//! manual basis overrides. It is an explicit, caller-owned object - there
//! are no module-level globals.
//!
//! Proxy basis values are memoized per `(currency, usd rate)`. Every
//! administrative write clears the affected memo entries *before*
//! returning success, so a read issued after a write returns can never
//! observe a value computed from the old parameters. Truly concurrent
//! writers are not a design target; last-write-wins is acceptable.

use std::collections::HashMap;

use dashmap::DashMap;
use parking_lot::RwLock;

use fulcrum_indicators::cip::{
    estimate_basis, rate_differential_pct, BasisEstimate, BasisInput, BasisMethod,
    CalibrationParams,
};

use crate::config::{FxCurrency, MonitorConfig, PolicyRates};
use crate::error::{EngineError, EngineResult};
use crate::snapshot::IndicatorSnapshot;
use crate::stage::{assess_stage, StageAssessment};

/// Partial policy-rate update. `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolicyRateUpdate {
    /// New ECB rate, in percent.
    pub ecb: Option<f64>,
    /// New BoJ rate, in percent.
    pub boj: Option<f64>,
}

/// Partial calibration update. `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationUpdate {
    /// New base offset, in bps.
    pub base_offset_bps: Option<f64>,
    /// New rate sensitivity, in bps per percent.
    pub rate_sensitivity: Option<f64>,
    /// New structural premium, in bps.
    pub structural_premium_bps: Option<f64>,
}

/// Memo key: a proxy basis is a function of the currency's calibration,
/// its policy rate, and the USD rate the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BasisKey {
    currency: FxCurrency,
    /// USD rate scaled to tenths of a bp, so the key is hashable.
    usd_rate_e4: i64,
}

impl BasisKey {
    fn new(currency: FxCurrency, usd_rate_pct: f64) -> Self {
        Self {
            currency,
            usd_rate_e4: (usd_rate_pct * 1e4).round() as i64,
        }
    }
}

/// The stateful monitoring engine.
pub struct MonitorEngine {
    config: MonitorConfig,
    policy_rates: RwLock<PolicyRates>,
    calibrations: RwLock<HashMap<FxCurrency, CalibrationParams>>,
    basis_overrides: RwLock<HashMap<FxCurrency, f64>>,
    basis_cache: DashMap<BasisKey, BasisEstimate>,
}

impl MonitorEngine {
    /// Creates an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold band or ladder in `config` is
    /// malformed.
    pub fn new(config: MonitorConfig) -> EngineResult<Self> {
        config.validate()?;
        let calibrations = HashMap::from([
            (FxCurrency::Eur, config.calibration.eur),
            (FxCurrency::Jpy, config.calibration.jpy),
        ]);
        Ok(Self {
            policy_rates: RwLock::new(config.policy_rates),
            calibrations: RwLock::new(calibrations),
            basis_overrides: RwLock::new(HashMap::new()),
            basis_cache: DashMap::new(),
            config,
        })
    }

    /// Creates an engine with shipped defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        // The default configuration is statically valid.
        match Self::new(MonitorConfig::default()) {
            Ok(engine) => engine,
            Err(_) => unreachable!("default config validates"),
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Current policy rates.
    #[must_use]
    pub fn policy_rates(&self) -> PolicyRates {
        *self.policy_rates.read()
    }

    /// Current calibration for `currency`.
    #[must_use]
    pub fn calibration(&self, currency: FxCurrency) -> CalibrationParams {
        self.calibrations
            .read()
            .get(&currency)
            .copied()
            .unwrap_or_else(|| self.config.calibration.for_currency(currency))
    }

    /// Updates policy rates; unnamed fields are unchanged.
    ///
    /// Clears the basis memos of every affected currency before returning,
    /// so no stale proxy survives the update.
    pub fn update_policy_rates(&self, update: PolicyRateUpdate) -> EngineResult<PolicyRates> {
        for (name, value) in [("ecb", update.ecb), ("boj", update.boj)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(EngineError::InvalidRate { name, value: v });
                }
            }
        }
        let rates = {
            let mut rates = self.policy_rates.write();
            if let Some(ecb) = update.ecb {
                rates.ecb = ecb;
            }
            if let Some(boj) = update.boj {
                rates.boj = boj;
            }
            *rates
        };
        if update.ecb.is_some() {
            self.invalidate(FxCurrency::Eur);
        }
        if update.boj.is_some() {
            self.invalidate(FxCurrency::Jpy);
        }
        tracing::info!(ecb = rates.ecb, boj = rates.boj, "policy rates updated");
        Ok(rates)
    }

    /// Updates the calibration for a currency named by string.
    ///
    /// # Errors
    ///
    /// Rejects unknown currencies and non-finite parameters, leaving prior
    /// state untouched.
    pub fn update_calibration_named(
        &self,
        currency: &str,
        update: CalibrationUpdate,
    ) -> EngineResult<CalibrationParams> {
        self.update_calibration(currency.parse()?, update)
    }

    /// Updates the calibration for `currency`; unnamed fields are
    /// unchanged.
    ///
    /// Clears the currency's basis memos before returning.
    pub fn update_calibration(
        &self,
        currency: FxCurrency,
        update: CalibrationUpdate,
    ) -> EngineResult<CalibrationParams> {
        for (name, value) in [
            ("base_offset_bps", update.base_offset_bps),
            ("rate_sensitivity", update.rate_sensitivity),
            ("structural_premium_bps", update.structural_premium_bps),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(EngineError::InvalidCalibration(format!(
                        "{name} must be finite, got {v}"
                    )));
                }
            }
        }
        let params = {
            let mut calibrations = self.calibrations.write();
            let params = calibrations
                .entry(currency)
                .or_insert_with(|| self.config.calibration.for_currency(currency));
            if let Some(offset) = update.base_offset_bps {
                params.base_offset_bps = offset;
            }
            if let Some(sensitivity) = update.rate_sensitivity {
                params.rate_sensitivity = sensitivity;
            }
            if let Some(premium) = update.structural_premium_bps {
                params.structural_premium_bps = Some(premium);
            }
            *params
        };
        self.invalidate(currency);
        tracing::info!(
            currency = %currency,
            base_offset_bps = params.base_offset_bps,
            rate_sensitivity = params.rate_sensitivity,
            "calibration updated"
        );
        Ok(params)
    }

    /// Sets a manual basis override for `currency`, bypassing the proxy.
    pub fn set_basis_override(&self, currency: FxCurrency, basis_bps: f64) -> EngineResult<()> {
        if !basis_bps.is_finite() {
            return Err(EngineError::InvalidCalibration(format!(
                "override must be finite, got {basis_bps}"
            )));
        }
        self.basis_overrides.write().insert(currency, basis_bps);
        self.invalidate(currency);
        tracing::info!(currency = %currency, basis_bps, "manual basis override set");
        Ok(())
    }

    /// Clears the manual basis override for `currency`, if any.
    pub fn clear_basis_override(&self, currency: FxCurrency) {
        let removed = self.basis_overrides.write().remove(&currency);
        if removed.is_some() {
            self.invalidate(currency);
            tracing::info!(currency = %currency, "manual basis override cleared");
        }
    }

    /// The basis estimate for `currency` at the given USD policy rate.
    ///
    /// Precedence: manual override, then memoized proxy, then a freshly
    /// computed proxy (memoized on the way out). Returns `None` when the
    /// USD rate is unavailable - never a fabricated level.
    #[must_use]
    pub fn basis_for(&self, currency: FxCurrency, usd_rate_pct: Option<f64>) -> Option<BasisEstimate> {
        if let Some(&basis_bps) = self.basis_overrides.read().get(&currency) {
            return Some(BasisEstimate {
                basis_bps,
                method: BasisMethod::ManualOverride,
            });
        }
        let usd_rate = usd_rate_pct?;
        let key = BasisKey::new(currency, usd_rate);
        if let Some(cached) = self.basis_cache.get(&key) {
            return Some(*cached);
        }
        let foreign_rate = self.policy_rates().rate_for(currency);
        let differential = rate_differential_pct(Some(usd_rate), Some(foreign_rate))?;
        let estimate = estimate_basis(&BasisInput::CalibratedProxy {
            rate_differential_pct: differential,
            calibration: self.calibration(currency),
        })?;
        self.basis_cache.insert(key, estimate);
        Some(estimate)
    }

    /// Assesses the crisis stage using the engine's configured cutoffs.
    #[must_use]
    pub fn assess(&self, snapshot: &IndicatorSnapshot) -> StageAssessment {
        assess_stage(snapshot, &self.config.stages, &self.config.stage0)
    }

    fn invalidate(&self, currency: FxCurrency) {
        let before = self.basis_cache.len();
        self.basis_cache.retain(|key, _| key.currency != currency);
        tracing::debug!(
            currency = %currency,
            cleared = before - self.basis_cache.len(),
            "basis memo invalidated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calibration_update_reflected_not_stale() {
        let engine = MonitorEngine::with_defaults();

        // baseline: base -15, sensitivity 8, fed funds 5.25 vs ecb 3.00
        engine
            .update_policy_rates(PolicyRateUpdate {
                ecb: Some(3.00),
                boj: None,
            })
            .unwrap();
        let basis = engine.basis_for(FxCurrency::Eur, Some(5.25)).unwrap();
        assert_relative_eq!(basis.basis_bps, -33.0, max_relative = 1e-9);
        assert_eq!(basis.method, BasisMethod::CipDeviationProxy);

        // same inputs again: memoized path must agree
        let again = engine.basis_for(FxCurrency::Eur, Some(5.25)).unwrap();
        assert_relative_eq!(again.basis_bps, -33.0, max_relative = 1e-9);

        // update the calibration; the very next read must see it
        engine
            .update_calibration(
                FxCurrency::Eur,
                CalibrationUpdate {
                    base_offset_bps: Some(-30.0),
                    ..CalibrationUpdate::default()
                },
            )
            .unwrap();
        let basis = engine.basis_for(FxCurrency::Eur, Some(5.25)).unwrap();
        assert_relative_eq!(basis.basis_bps, -48.0, max_relative = 1e-9);
    }

    #[test]
    fn test_policy_rate_update_invalidates_affected_currency() {
        let engine = MonitorEngine::with_defaults();
        let before = engine.basis_for(FxCurrency::Jpy, Some(5.25)).unwrap();

        engine
            .update_policy_rates(PolicyRateUpdate {
                ecb: None,
                boj: Some(0.75),
            })
            .unwrap();
        let after = engine.basis_for(FxCurrency::Jpy, Some(5.25)).unwrap();
        // differential shrank by 0.25, sensitivity 12 -> basis rises 3 bps
        assert_relative_eq!(after.basis_bps - before.basis_bps, 3.0, max_relative = 1e-9);
    }

    #[test]
    fn test_unknown_currency_rejected_state_untouched() {
        let engine = MonitorEngine::with_defaults();
        let before = engine.calibration(FxCurrency::Eur);
        let err = engine
            .update_calibration_named(
                "chf",
                CalibrationUpdate {
                    base_offset_bps: Some(-99.0),
                    ..CalibrationUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownCurrency(_)));
        assert_eq!(engine.calibration(FxCurrency::Eur), before);
    }

    #[test]
    fn test_non_finite_calibration_rejected() {
        let engine = MonitorEngine::with_defaults();
        let err = engine
            .update_calibration(
                FxCurrency::Eur,
                CalibrationUpdate {
                    rate_sensitivity: Some(f64::NAN),
                    ..CalibrationUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidCalibration(_)));
        // prior calibration intact
        assert_relative_eq!(
            engine.calibration(FxCurrency::Eur).rate_sensitivity,
            8.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_manual_override_bypasses_proxy() {
        let engine = MonitorEngine::with_defaults();
        engine.set_basis_override(FxCurrency::Jpy, -62.0).unwrap();
        let basis = engine.basis_for(FxCurrency::Jpy, Some(5.25)).unwrap();
        assert_relative_eq!(basis.basis_bps, -62.0, max_relative = 1e-9);
        assert_eq!(basis.method, BasisMethod::ManualOverride);

        // even with no USD rate the override answers
        let basis = engine.basis_for(FxCurrency::Jpy, None).unwrap();
        assert_eq!(basis.method, BasisMethod::ManualOverride);

        engine.clear_basis_override(FxCurrency::Jpy);
        let basis = engine.basis_for(FxCurrency::Jpy, Some(5.25)).unwrap();
        assert_eq!(basis.method, BasisMethod::CipDeviationProxy);
    }

    #[test]
    fn test_missing_usd_rate_yields_none() {
        let engine = MonitorEngine::with_defaults();
        assert_eq!(engine.basis_for(FxCurrency::Eur, None), None);
    }

    #[test]
    fn test_distinct_usd_rates_memoized_separately() {
        let engine = MonitorEngine::with_defaults();
        let a = engine.basis_for(FxCurrency::Eur, Some(5.25)).unwrap();
        let b = engine.basis_for(FxCurrency::Eur, Some(4.25)).unwrap();
        assert_relative_eq!(a.basis_bps - b.basis_bps, -8.0, max_relative = 1e-9);
    }
}
