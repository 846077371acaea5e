//! Market data assembly and indicator evaluation.
//!
//! Upstream collaborators fetch raw series concurrently and hand the
//! results over as a [`MarketData`] record; a failed fetch arrives as an
//! empty series, not an error. Everything here tolerates partial data and
//! propagates "unavailable" as `None` down to the zone evaluator, which
//! renders it as `Unknown`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use fulcrum_core::types::{Date, IndicatorConfig, IndicatorId, Series, ALL_INDICATORS};
use fulcrum_core::zones::{evaluate_ladder, evaluate_zone, ThresholdSet, ZoneResult};
use fulcrum_indicators::cip::{rate_differential_pct, total_hedging_cost_pct, BasisEstimate, BasisMethod};
use fulcrum_indicators::formulas::{
    average_auction_tail, hedging_spread_bps, interest_expense_ratio, AuctionYields,
};
use fulcrum_indicators::trend::{ratio_series, roc_over_months, ttm_sum};

use crate::config::FxCurrency;
use crate::engine::MonitorEngine;
use crate::snapshot::IndicatorSnapshot;

/// Raw inputs for one evaluation, as delivered by the data collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Evaluation as-of date (TTM windows anchor here).
    #[serde(default = "Date::today")]
    pub as_of: Date,
    /// US 10-year Treasury yield series (percent).
    pub us_10y: Series,
    /// JGB 10-year yield series (percent).
    pub jgb_10y: Series,
    /// Gold price series (USD/oz).
    pub gold: Series,
    /// Treasury proxy price series (e.g. a long-duration Treasury ETF).
    pub treasury_proxy: Series,
    /// Recent auction results.
    pub auctions: Vec<AuctionYields>,
    /// Monthly federal interest expense (USD billions, monthly, not
    /// fiscal-year-to-date).
    pub interest_expense: Series,
    /// Monthly federal receipts (USD billions).
    pub receipts: Series,
    /// Current fed funds rate (percent).
    pub fed_funds_pct: Option<f64>,
}

impl Default for MarketData {
    fn default() -> Self {
        Self {
            as_of: Date::today(),
            us_10y: Series::empty(),
            jgb_10y: Series::empty(),
            gold: Series::empty(),
            treasury_proxy: Series::empty(),
            auctions: Vec::new(),
            interest_expense: Series::empty(),
            receipts: Series::empty(),
            fed_funds_pct: None,
        }
    }
}

/// Pass-through signals that feed the classifier but are not computed
/// from [`MarketData`] series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliarySignals {
    /// VIX level.
    pub vix: Option<f64>,
    /// High-yield OAS (bps).
    pub high_yield_spread_bps: Option<f64>,
    /// Dollar index change (percent).
    pub dollar_index_change_pct: Option<f64>,
    /// Fed balance sheet change (USD trillions).
    pub fed_balance_sheet_change_tn: Option<f64>,
    /// 10-year inflation breakeven (percent).
    pub inflation_breakeven_pct: Option<f64>,
    /// Gold price change (percent).
    pub gold_change_pct: Option<f64>,
    /// Foreign Treasury holdings change (percent).
    pub foreign_holdings_change_pct: Option<f64>,
    /// Annualized CPI (percent).
    pub cpi_annualized_pct: Option<f64>,
}

/// Current values of the five core indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreIndicatorValues {
    /// Japanese hedging spread (bps).
    pub hedging_spread_bps: Option<f64>,
    /// USD/JPY basis estimate, with its method.
    pub basis: Option<BasisEstimate>,
    /// Average auction tail (bps).
    pub auction_tail_bps: Option<f64>,
    /// Gold/Treasury ratio 6-month RoC (fraction).
    pub gold_roc_6m: Option<f64>,
    /// Gold/Treasury ratio 12-month RoC (fraction).
    pub gold_roc_12m: Option<f64>,
    /// Interest expense / receipts, TTM (fraction).
    pub interest_expense_ratio: Option<f64>,
}

impl CoreIndicatorValues {
    /// The value carried by indicator `id`.
    #[must_use]
    pub fn value_for(&self, id: IndicatorId) -> Option<f64> {
        match id {
            IndicatorId::HedgingSpread => self.hedging_spread_bps,
            IndicatorId::BasisSwap => self.basis.map(|b| b.basis_bps),
            IndicatorId::AuctionTail => self.auction_tail_bps,
            IndicatorId::GoldTreasuryRatio => self.gold_roc_12m,
            IndicatorId::InterestExpenseRatio => self.interest_expense_ratio,
        }
    }
}

/// Per-evaluation threshold overrides, keyed by indicator.
pub type ThresholdOverrides = HashMap<IndicatorId, ThresholdSet>;

/// One classified indicator, with the configuration that classified it
/// echoed back for the presentation layer. Output-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorReading {
    /// Indicator identity.
    pub id: IndicatorId,
    /// Current value in natural units, if computable.
    pub value: Option<f64>,
    /// Value scaled by the config's display multiplier.
    pub display_value: Option<f64>,
    /// Zone classification of `value`.
    pub zone: ZoneResult,
    /// The configuration applied (base config with any per-evaluation
    /// override merged in).
    pub config: IndicatorConfig,
    /// For the basis swap indicator: how the value was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<BasisMethod>,
}

/// Secondary indicators classified on flat ladders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryIndicator {
    /// CBOE volatility index.
    Vix,
    /// High-yield option-adjusted spread.
    HighYieldSpread,
}

impl MonitorEngine {
    /// Computes current values for all five core indicators.
    pub fn core_indicators(&self, data: &MarketData) -> CoreIndicatorValues {
        let basis = self.basis_for(FxCurrency::Jpy, data.fed_funds_pct);
        let boj = self.policy_rates().boj;
        let rate_diff = rate_differential_pct(data.fed_funds_pct, Some(boj));
        let hedge_cost = total_hedging_cost_pct(rate_diff, basis.map(|b| b.basis_bps));
        let ratio = ratio_series(&data.gold, &data.treasury_proxy);
        CoreIndicatorValues {
            hedging_spread_bps: hedging_spread_bps(
                data.us_10y.latest_value(),
                data.jgb_10y.latest_value(),
                hedge_cost,
            ),
            basis,
            auction_tail_bps: average_auction_tail(&data.auctions),
            gold_roc_6m: roc_over_months(&ratio, 6),
            gold_roc_12m: roc_over_months(&ratio, 12),
            interest_expense_ratio: interest_expense_ratio(
                ttm_sum(&data.interest_expense, data.as_of),
                ttm_sum(&data.receipts, data.as_of),
            ),
        }
    }

    /// Computes and classifies all five core indicators.
    ///
    /// `overrides` replaces threshold bands zone by zone for the named
    /// indicators, for this evaluation only; the base configuration never
    /// mutates.
    pub fn indicator_readings(
        &self,
        data: &MarketData,
        overrides: Option<&ThresholdOverrides>,
    ) -> Vec<IndicatorReading> {
        let values = self.core_indicators(data);
        ALL_INDICATORS
            .iter()
            .map(|&id| {
                let mut config = self.config().indicator_config(id);
                if let Some(set) = overrides.and_then(|o| o.get(&id)) {
                    config.thresholds = config.thresholds.merged(set);
                }
                let value = values.value_for(id);
                IndicatorReading {
                    id,
                    value,
                    display_value: value.map(|v| config.display_value(v)),
                    zone: evaluate_zone(value, &config.thresholds),
                    method: match id {
                        IndicatorId::BasisSwap => values.basis.map(|b| b.method),
                        _ => None,
                    },
                    config,
                }
            })
            .collect()
    }

    /// Classifies a secondary indicator on its configured ladder.
    #[must_use]
    pub fn secondary_reading(&self, kind: SecondaryIndicator, value: Option<f64>) -> ZoneResult {
        let ladder = match kind {
            SecondaryIndicator::Vix => &self.config().secondary.vix,
            SecondaryIndicator::HighYieldSpread => &self.config().secondary.high_yield_spread_bps,
        };
        evaluate_ladder(value, ladder)
    }

    /// Assembles the classifier snapshot from computed indicators plus
    /// pass-through auxiliary signals.
    pub fn snapshot_from(&self, data: &MarketData, aux: &AuxiliarySignals) -> IndicatorSnapshot {
        let values = self.core_indicators(data);
        IndicatorSnapshot {
            hedging_spread_bps: values.hedging_spread_bps,
            basis_swap_bps: values.basis.map(|b| b.basis_bps),
            auction_tail_bps: values.auction_tail_bps,
            gold_treasury_roc: values.gold_roc_12m,
            interest_expense_ratio: values.interest_expense_ratio,
            vix: aux.vix,
            high_yield_spread_bps: aux.high_yield_spread_bps,
            dollar_index_change_pct: aux.dollar_index_change_pct,
            fed_balance_sheet_change_tn: aux.fed_balance_sheet_change_tn,
            inflation_breakeven_pct: aux.inflation_breakeven_pct,
            gold_change_pct: aux.gold_change_pct,
            foreign_holdings_change_pct: aux.foreign_holdings_change_pct,
            cpi_annualized_pct: aux.cpi_annualized_pct,
        }
    }
}
