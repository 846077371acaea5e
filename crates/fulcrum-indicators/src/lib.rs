//! # Fulcrum Indicators
//!
//! The pure calculation library for the Fulcrum monetary-regime risk
//! monitor:
//!
//! - **Formulas**: hedging spread, auction tail, gold/Treasury ratio,
//!   interest expense ratio, rate of change, TIPS breakeven
//! - **Trend**: calendar-month change windows and trailing-twelve-month
//!   aggregation over gappy series
//! - **CIP**: cross-currency basis from actual forward points, or from a
//!   calibrated proxy when forward data is unavailable
//!
//! Every function here is total and side-effect free. A missing input
//! (`None`) or a degenerate denominator yields `None` - never a panic,
//! never `NaN`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cip;
pub mod formulas;
pub mod trend;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cip::{
        estimate_basis, rate_differential_pct, total_hedging_cost_pct, BasisEstimate, BasisInput,
        BasisMethod, CalibrationParams,
    };
    pub use crate::formulas::{
        auction_tail_bps, average_auction_tail, breakeven_rate_pct, gold_treasury_ratio,
        hedging_spread_bps, interest_expense_ratio, rate_of_change, AuctionYields,
    };
    pub use crate::trend::{change_over_months, ratio_series, roc_over_months, ttm_sum};
}
