//! The classifier's input snapshot.

use serde::{Deserialize, Serialize};

/// A fixed-shape record of current indicator values feeding the stage
/// classifier.
///
/// Every field may be `None`; a missing field simply fails its associated
/// trigger conditions. Units are part of the field names: `_bps` is basis
/// points, `_pct` percent, `_tn` USD trillions, bare ratios are fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSnapshot {
    /// Japanese hedging spread (bps).
    pub hedging_spread_bps: Option<f64>,
    /// Basis swap level (bps).
    pub basis_swap_bps: Option<f64>,
    /// Average auction tail (bps).
    pub auction_tail_bps: Option<f64>,
    /// Gold/Treasury ratio 12-month rate of change (fraction).
    pub gold_treasury_roc: Option<f64>,
    /// Federal interest expense / receipts (fraction).
    pub interest_expense_ratio: Option<f64>,
    /// VIX level.
    pub vix: Option<f64>,
    /// High-yield OAS (bps).
    pub high_yield_spread_bps: Option<f64>,
    /// Dollar index change (percent; negative = weakening).
    pub dollar_index_change_pct: Option<f64>,
    /// Fed balance sheet change (USD trillions; positive = growth).
    pub fed_balance_sheet_change_tn: Option<f64>,
    /// 10-year inflation breakeven (percent).
    pub inflation_breakeven_pct: Option<f64>,
    /// Gold price change (percent).
    pub gold_change_pct: Option<f64>,
    /// Foreign Treasury holdings change (percent; negative = selling).
    pub foreign_holdings_change_pct: Option<f64>,
    /// Annualized CPI (percent).
    pub cpi_annualized_pct: Option<f64>,
}
