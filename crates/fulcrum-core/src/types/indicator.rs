//! Indicator identity and static configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::zones::{ThresholdBand, ThresholdSet};

/// Identity of one of the five core indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorId {
    /// Japanese hedging spread (bps).
    HedgingSpread,
    /// USD/JPY cross-currency basis swap level (bps).
    BasisSwap,
    /// Treasury auction tail, averaged over recent auctions (bps).
    AuctionTail,
    /// 12-month rate of change of the gold / Treasury-proxy ratio (fraction).
    GoldTreasuryRatio,
    /// Federal interest expense / receipts, trailing twelve months (fraction).
    InterestExpenseRatio,
}

/// All five core indicators, in presentation order.
pub const ALL_INDICATORS: [IndicatorId; 5] = [
    IndicatorId::HedgingSpread,
    IndicatorId::BasisSwap,
    IndicatorId::AuctionTail,
    IndicatorId::GoldTreasuryRatio,
    IndicatorId::InterestExpenseRatio,
];

impl IndicatorId {
    /// Stable snake_case slug.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            IndicatorId::HedgingSpread => "hedging_spread",
            IndicatorId::BasisSwap => "basis_swap",
            IndicatorId::AuctionTail => "auction_tail",
            IndicatorId::GoldTreasuryRatio => "gold_treasury_ratio",
            IndicatorId::InterestExpenseRatio => "interest_expense_ratio",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            IndicatorId::HedgingSpread => "Japanese Hedging Spread",
            IndicatorId::BasisSwap => "USD/JPY Basis Swap",
            IndicatorId::AuctionTail => "Treasury Auction Tail",
            IndicatorId::GoldTreasuryRatio => "Gold/Treasury Ratio Momentum",
            IndicatorId::InterestExpenseRatio => "Federal Interest Expense Ratio",
        }
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Static metadata for one core indicator.
///
/// Immutable at runtime. Per-evaluation threshold overrides are merged via
/// [`ThresholdSet::merged`]; the base config never mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Indicator identity.
    pub id: IndicatorId,
    /// Human-readable name.
    pub name: String,
    /// Display unit (e.g. "bps", "%").
    pub unit: String,
    /// Multiplier applied for display only; the value itself is stored in
    /// natural units (e.g. a ratio stored as a fraction, displayed x100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_multiplier: Option<f64>,
    /// Whether increasing values are adverse (`false`) or favorable (`true`,
    /// i.e. the indicator worsens as it falls).
    #[serde(default)]
    pub inverted: bool,
    /// Threshold bands in the indicator's native unit.
    pub thresholds: ThresholdSet,
}

impl IndicatorConfig {
    /// Default configuration for `id`.
    ///
    /// These are the shipped defaults; deployments normally load the real
    /// values from the monitor's TOML config.
    #[must_use]
    pub fn defaults_for(id: IndicatorId) -> Self {
        match id {
            IndicatorId::HedgingSpread => Self {
                id,
                name: id.display_name().to_string(),
                unit: "bps".to_string(),
                display_multiplier: None,
                inverted: true,
                thresholds: ThresholdSet {
                    normal: Some(ThresholdBand::at_least(0.0)),
                    warning: Some(ThresholdBand::between(-50.0, 0.0)),
                    danger: Some(ThresholdBand::between(-100.0, -50.0)),
                    critical: Some(ThresholdBand::below(-100.0)),
                },
            },
            IndicatorId::BasisSwap => Self {
                id,
                name: id.display_name().to_string(),
                unit: "bps".to_string(),
                display_multiplier: None,
                inverted: true,
                thresholds: ThresholdSet {
                    normal: Some(ThresholdBand::at_least(-10.0)),
                    warning: Some(ThresholdBand::between(-25.0, -10.0)),
                    danger: Some(ThresholdBand::between(-50.0, -25.0)),
                    critical: Some(ThresholdBand::below(-50.0)),
                },
            },
            IndicatorId::AuctionTail => Self {
                id,
                name: id.display_name().to_string(),
                unit: "bps".to_string(),
                display_multiplier: None,
                inverted: false,
                thresholds: ThresholdSet {
                    normal: Some(ThresholdBand::below(1.0)),
                    warning: Some(ThresholdBand::between(1.0, 3.0)),
                    danger: Some(ThresholdBand::between(3.0, 5.0)),
                    critical: Some(ThresholdBand::at_least(5.0)),
                },
            },
            IndicatorId::GoldTreasuryRatio => Self {
                id,
                name: id.display_name().to_string(),
                unit: "%".to_string(),
                display_multiplier: Some(100.0),
                inverted: false,
                thresholds: ThresholdSet {
                    normal: Some(ThresholdBand::below(0.10)),
                    warning: Some(ThresholdBand::between(0.10, 0.25)),
                    danger: Some(ThresholdBand::between(0.25, 0.50)),
                    critical: Some(ThresholdBand::at_least(0.50)),
                },
            },
            IndicatorId::InterestExpenseRatio => Self {
                id,
                name: id.display_name().to_string(),
                unit: "%".to_string(),
                display_multiplier: Some(100.0),
                inverted: false,
                thresholds: ThresholdSet {
                    normal: Some(ThresholdBand::below(0.18)),
                    warning: Some(ThresholdBand::between(0.18, 0.25)),
                    danger: Some(ThresholdBand::between(0.25, 0.35)),
                    critical: Some(ThresholdBand::at_least(0.35)),
                },
            },
        }
    }

    /// The value as displayed (natural value times the display multiplier).
    #[must_use]
    pub fn display_value(&self, value: f64) -> f64 {
        value * self.display_multiplier.unwrap_or(1.0)
    }
}
