//! Monitor configuration.
//!
//! Every numeric cutoff the engine applies - indicator threshold bands,
//! secondary ladders, stage trigger constants, pre-crisis concern cutoffs,
//! default policy rates and calibrations - is data loaded from a TOML
//! file, with shipped defaults matching the monitor's published
//! methodology. Nothing in the classifier is a hardcoded literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use fulcrum_core::types::{IndicatorConfig, IndicatorId};
use fulcrum_core::zones::{LadderThresholds, ThresholdSet};
use fulcrum_indicators::cip::CalibrationParams;

use crate::error::{EngineError, EngineResult};

/// Foreign currencies with a calibrated basis proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FxCurrency {
    /// Euro (vs USD).
    Eur,
    /// Japanese yen (vs USD).
    Jpy,
}

impl FxCurrency {
    /// Lowercase ISO-ish code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FxCurrency::Eur => "eur",
            FxCurrency::Jpy => "jpy",
        }
    }
}

impl fmt::Display for FxCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FxCurrency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eur" => Ok(FxCurrency::Eur),
            "jpy" => Ok(FxCurrency::Jpy),
            other => Err(EngineError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Foreign central bank policy rates, in percent.
///
/// Stand-ins used when no live feed provides them; updatable through the
/// engine's administrative surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyRates {
    /// ECB deposit facility rate.
    #[serde(default = "default_ecb_rate")]
    pub ecb: f64,
    /// BoJ policy rate.
    #[serde(default = "default_boj_rate")]
    pub boj: f64,
}

fn default_ecb_rate() -> f64 {
    2.15
}

fn default_boj_rate() -> f64 {
    0.50
}

impl Default for PolicyRates {
    fn default() -> Self {
        Self {
            ecb: default_ecb_rate(),
            boj: default_boj_rate(),
        }
    }
}

impl PolicyRates {
    /// The policy rate for `currency`.
    #[must_use]
    pub fn rate_for(&self, currency: FxCurrency) -> f64 {
        match currency {
            FxCurrency::Eur => self.ecb,
            FxCurrency::Jpy => self.boj,
        }
    }
}

/// Threshold bands for the five core indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorThresholds {
    /// Japanese hedging spread bands (bps).
    pub hedging_spread: ThresholdSet,
    /// Basis swap level bands (bps).
    pub basis_swap: ThresholdSet,
    /// Auction tail bands (bps).
    pub auction_tail: ThresholdSet,
    /// Gold/Treasury ratio 12-month RoC bands (fraction).
    pub gold_treasury_ratio: ThresholdSet,
    /// Interest expense ratio bands (fraction).
    pub interest_expense_ratio: ThresholdSet,
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            hedging_spread: IndicatorConfig::defaults_for(IndicatorId::HedgingSpread).thresholds,
            basis_swap: IndicatorConfig::defaults_for(IndicatorId::BasisSwap).thresholds,
            auction_tail: IndicatorConfig::defaults_for(IndicatorId::AuctionTail).thresholds,
            gold_treasury_ratio: IndicatorConfig::defaults_for(IndicatorId::GoldTreasuryRatio)
                .thresholds,
            interest_expense_ratio:
                IndicatorConfig::defaults_for(IndicatorId::InterestExpenseRatio).thresholds,
        }
    }
}

impl IndicatorThresholds {
    /// The configured bands for `id`.
    #[must_use]
    pub fn for_indicator(&self, id: IndicatorId) -> &ThresholdSet {
        match id {
            IndicatorId::HedgingSpread => &self.hedging_spread,
            IndicatorId::BasisSwap => &self.basis_swap,
            IndicatorId::AuctionTail => &self.auction_tail,
            IndicatorId::GoldTreasuryRatio => &self.gold_treasury_ratio,
            IndicatorId::InterestExpenseRatio => &self.interest_expense_ratio,
        }
    }

    /// Validates every band set.
    pub fn validate(&self) -> EngineResult<()> {
        for id in fulcrum_core::types::ALL_INDICATORS {
            self.for_indicator(id).validate()?;
        }
        Ok(())
    }
}

/// Flat ladders for the secondary indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryThresholds {
    /// VIX ladder.
    pub vix: LadderThresholds,
    /// High-yield OAS ladder, in bps.
    pub high_yield_spread_bps: LadderThresholds,
}

impl Default for SecondaryThresholds {
    fn default() -> Self {
        Self {
            vix: LadderThresholds {
                warning: 20.0,
                danger: 30.0,
                critical: 40.0,
            },
            high_yield_spread_bps: LadderThresholds {
                warning: 400.0,
                danger: 550.0,
                critical: 700.0,
            },
        }
    }
}

/// Stage 1 (Traditional Crisis) trigger cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage1Triggers {
    /// VIX above this fires the volatility trigger.
    pub vix_extreme: f64,
    /// High-yield spread above this (bps) fires the credit trigger.
    pub high_yield_spread_bps: f64,
    /// Average auction tail above this (bps) fires the auction trigger.
    pub auction_tail_bps: f64,
    /// Hedging spread below this (bps) fires the hedging trigger.
    pub hedging_spread_bps: f64,
    /// VIX above this, with the dollar weakening, fires the joint trigger.
    pub dollar_weakness_vix: f64,
    /// Minimum fired triggers for the stage to fire.
    pub min_triggers: usize,
}

impl Default for Stage1Triggers {
    fn default() -> Self {
        Self {
            vix_extreme: 40.0,
            high_yield_spread_bps: 700.0,
            auction_tail_bps: 4.0,
            hedging_spread_bps: -50.0,
            dollar_weakness_vix: 25.0,
            min_triggers: 3,
        }
    }
}

/// Stage 2 (Intervention) trigger cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage2Triggers {
    /// Fed balance sheet growth above this (USD trillions).
    pub balance_sheet_growth_tn: f64,
    /// 10-year inflation breakeven above this (percent).
    pub breakeven_pct: f64,
    /// Dollar index decline of more than this (percent magnitude).
    pub dollar_decline_pct: f64,
    /// Gold up more than this (percent).
    pub gold_surge_pct: f64,
    /// Minimum fired triggers for the stage to fire.
    pub min_triggers: usize,
}

impl Default for Stage2Triggers {
    fn default() -> Self {
        Self {
            balance_sheet_growth_tn: 2.0,
            breakeven_pct: 4.0,
            dollar_decline_pct: 15.0,
            gold_surge_pct: 30.0,
            min_triggers: 2,
        }
    }
}

/// Stage 3 (Credibility Crisis) trigger cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage3Triggers {
    /// Sustained dollar decline of more than this (percent magnitude).
    pub dollar_decline_pct: f64,
    /// Gold acceleration above this (percent).
    pub gold_acceleration_pct: f64,
    /// Foreign-holdings decline of more than this (percent magnitude).
    pub foreign_selling_pct: f64,
    /// Minimum fired triggers for the stage to fire.
    pub min_triggers: usize,
}

impl Default for Stage3Triggers {
    fn default() -> Self {
        Self {
            dollar_decline_pct: 20.0,
            gold_acceleration_pct: 50.0,
            foreign_selling_pct: 10.0,
            min_triggers: 2,
        }
    }
}

/// Stage 4 (Regime Transition) trigger cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage4Triggers {
    /// Annualized CPI above this (percent).
    pub cpi_annualized_pct: f64,
    /// Minimum fired triggers for the stage to fire.
    pub min_triggers: usize,
}

impl Default for Stage4Triggers {
    fn default() -> Self {
        Self {
            cpi_annualized_pct: 10.0,
            min_triggers: 1,
        }
    }
}

/// All stage trigger cutoffs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTriggerConfig {
    /// Stage 1 cutoffs.
    pub stage1: Stage1Triggers,
    /// Stage 2 cutoffs.
    pub stage2: Stage2Triggers,
    /// Stage 3 cutoffs.
    pub stage3: Stage3Triggers,
    /// Stage 4 cutoffs.
    pub stage4: Stage4Triggers,
}

/// Pre-crisis concern cutoffs for the Stage 0 sub-classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage0Config {
    /// Hedging spread below this (bps) is a concern.
    pub hedging_spread_bps: f64,
    /// Auction tail above this (bps) is a concern.
    pub auction_tail_bps: f64,
    /// Interest expense ratio above this (fraction) is a concern.
    pub interest_ratio: f64,
    /// Basis swap above this (bps, narrowing toward zero) is a concern.
    pub basis_swap_bps: f64,
    /// Gold/Treasury RoC above this (fraction) is a concern.
    pub gold_roc: f64,
    /// Concern count at or above this is labeled Elevated.
    pub elevated_min: usize,
}

impl Default for Stage0Config {
    fn default() -> Self {
        Self {
            hedging_spread_bps: 0.0,
            auction_tail_bps: 2.0,
            interest_ratio: 0.18,
            basis_swap_bps: -15.0,
            gold_roc: 0.10,
            elevated_min: 3,
        }
    }
}

/// Default per-currency calibrations for the basis proxy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationDefaults {
    /// EUR/USD calibration.
    pub eur: CalibrationParams,
    /// USD/JPY calibration.
    pub jpy: CalibrationParams,
}

impl Default for CalibrationDefaults {
    fn default() -> Self {
        Self {
            eur: CalibrationParams::new(-15.0, 8.0),
            jpy: CalibrationParams::with_structural_premium(-20.0, 12.0, -15.0),
        }
    }
}

impl CalibrationDefaults {
    /// The default calibration for `currency`.
    #[must_use]
    pub fn for_currency(&self, currency: FxCurrency) -> CalibrationParams {
        match currency {
            FxCurrency::Eur => self.eur,
            FxCurrency::Jpy => self.jpy,
        }
    }
}

/// Complete monitor configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Core indicator threshold bands.
    pub indicators: IndicatorThresholds,
    /// Secondary indicator ladders.
    pub secondary: SecondaryThresholds,
    /// Stage trigger cutoffs.
    pub stages: StageTriggerConfig,
    /// Pre-crisis concern cutoffs.
    pub stage0: Stage0Config,
    /// Default policy rates.
    pub policy_rates: PolicyRates,
    /// Default basis calibrations.
    pub calibration: CalibrationDefaults,
}

impl MonitorConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    pub fn from_file(path: &str) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::ConfigRead {
            path: path.to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> EngineResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every threshold band and ladder.
    pub fn validate(&self) -> EngineResult<()> {
        self.indicators.validate()?;
        LadderThresholds::new(
            self.secondary.vix.warning,
            self.secondary.vix.danger,
            self.secondary.vix.critical,
        )?;
        LadderThresholds::new(
            self.secondary.high_yield_spread_bps.warning,
            self.secondary.high_yield_spread_bps.danger,
            self.secondary.high_yield_spread_bps.critical,
        )?;
        Ok(())
    }

    /// Full indicator config (metadata + configured bands) for `id`.
    #[must_use]
    pub fn indicator_config(&self, id: IndicatorId) -> IndicatorConfig {
        IndicatorConfig {
            thresholds: self.indicators.for_indicator(id).clone(),
            ..IndicatorConfig::defaults_for(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulcrum_core::zones::{evaluate_zone, Zone};

    #[test]
    fn test_defaults_validate() {
        MonitorConfig::default().validate().unwrap();
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("EUR".parse::<FxCurrency>().unwrap(), FxCurrency::Eur);
        assert_eq!("jpy".parse::<FxCurrency>().unwrap(), FxCurrency::Jpy);
        let err = "chf".parse::<FxCurrency>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownCurrency(c) if c == "chf"));
    }

    #[test]
    fn test_stage_trigger_defaults_match_methodology() {
        let stages = StageTriggerConfig::default();
        assert_eq!(stages.stage1.vix_extreme, 40.0);
        assert_eq!(stages.stage1.min_triggers, 3);
        assert_eq!(stages.stage2.balance_sheet_growth_tn, 2.0);
        assert_eq!(stages.stage2.min_triggers, 2);
        assert_eq!(stages.stage3.gold_acceleration_pct, 50.0);
        assert_eq!(stages.stage4.cpi_annualized_pct, 10.0);
        assert_eq!(stages.stage4.min_triggers, 1);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = MonitorConfig::from_toml(
            r#"
            [stages.stage1]
            vix_extreme = 45.0

            [policy_rates]
            ecb = 3.0

            [calibration.eur]
            base_offset_bps = -12.0
            rate_sensitivity = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(config.stages.stage1.vix_extreme, 45.0);
        // untouched fields keep their defaults
        assert_eq!(config.stages.stage1.min_triggers, 3);
        assert_eq!(config.policy_rates.ecb, 3.0);
        assert_eq!(config.policy_rates.boj, 0.50);
        assert_eq!(config.calibration.eur.base_offset_bps, -12.0);
        assert_eq!(config.calibration.jpy.structural_premium_bps, Some(-15.0));
    }

    #[test]
    fn test_threshold_bands_from_toml() {
        let config = MonitorConfig::from_toml(
            r#"
            [indicators.auction_tail]
            normal = { max = 1.5 }
            warning = { min = 1.5, max = 3.0 }
            danger = { min = 3.0, max = 5.0 }
            critical = { min = 5.0 }
            "#,
        )
        .unwrap();
        let bands = config.indicators.for_indicator(IndicatorId::AuctionTail);
        assert_eq!(evaluate_zone(Some(1.2), bands).zone, Zone::Normal);
        assert_eq!(evaluate_zone(Some(1.5), bands).zone, Zone::Warning);
    }

    #[test]
    fn test_malformed_band_rejected() {
        // warning band with neither bound
        let err = MonitorConfig::from_toml(
            r#"
            [indicators.basis_swap]
            warning = {}
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("neither min nor max"));
    }

    #[test]
    fn test_garbage_toml_rejected() {
        assert!(matches!(
            MonitorConfig::from_toml("stages = 4"),
            Err(EngineError::ConfigParse(_))
        ));
    }
}
