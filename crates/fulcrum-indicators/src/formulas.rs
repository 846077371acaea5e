//! Core indicator formulas.
//!
//! All inputs are in natural units: yields and rates in percent, prices in
//! USD, ratios as fractions. Spread outputs are in basis points.
//!
//! `None` means "no observation" and is distinct from `0.0` everywhere: a
//! 0% yield is a valid input, a missing one propagates as `None`.

use serde::{Deserialize, Serialize};

/// Japanese hedging spread in basis points.
///
/// `(US10Y% - JGB10Y% - FX hedge cost%) x 100`. Very negative values mean
/// hedged Treasury carry has turned against Japanese institutions,
/// incentivizing them to sell.
#[must_use]
pub fn hedging_spread_bps(
    us_10y_pct: Option<f64>,
    jgb_10y_pct: Option<f64>,
    hedge_cost_pct: Option<f64>,
) -> Option<f64> {
    Some((us_10y_pct? - jgb_10y_pct? - hedge_cost_pct?) * 100.0)
}

/// Auction tail in basis points: `(high yield% - when-issued%) x 100`.
///
/// A positive tail means the auction cleared cheaper than the market was
/// trading, i.e. demand disappointed.
#[must_use]
pub fn auction_tail_bps(high_yield_pct: Option<f64>, when_issued_pct: Option<f64>) -> Option<f64> {
    Some((high_yield_pct? - when_issued_pct?) * 100.0)
}

/// Yields from a single Treasury auction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionYields {
    /// The auction's high (stop-out) yield, in percent.
    pub high_yield_pct: Option<f64>,
    /// The when-issued yield immediately before the auction, in percent.
    pub when_issued_pct: Option<f64>,
}

impl AuctionYields {
    /// Auction with both yields observed.
    #[must_use]
    pub fn new(high_yield_pct: f64, when_issued_pct: f64) -> Self {
        Self {
            high_yield_pct: Some(high_yield_pct),
            when_issued_pct: Some(when_issued_pct),
        }
    }

    /// This auction's tail in bps, if both yields are present.
    #[must_use]
    pub fn tail_bps(&self) -> Option<f64> {
        auction_tail_bps(self.high_yield_pct, self.when_issued_pct)
    }
}

/// Arithmetic mean of tails across a set of auctions.
///
/// Auctions missing either yield are excluded, not zero-filled. `None`
/// when no auction qualifies.
#[must_use]
pub fn average_auction_tail(auctions: &[AuctionYields]) -> Option<f64> {
    let tails: Vec<f64> = auctions.iter().filter_map(AuctionYields::tail_bps).collect();
    if tails.is_empty() {
        return None;
    }
    Some(tails.iter().sum::<f64>() / tails.len() as f64)
}

/// Gold price per ounce over a Treasury proxy price.
///
/// `None` when the denominator is zero or missing.
#[must_use]
pub fn gold_treasury_ratio(
    gold_usd_per_oz: Option<f64>,
    treasury_proxy_price: Option<f64>,
) -> Option<f64> {
    let denominator = treasury_proxy_price?;
    if denominator == 0.0 {
        return None;
    }
    Some(gold_usd_per_oz? / denominator)
}

/// Fractional rate of change: `(current - previous) / previous`.
///
/// `None` when `previous` is zero or missing.
#[must_use]
pub fn rate_of_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let previous = previous?;
    if previous == 0.0 {
        return None;
    }
    Some((current? - previous) / previous)
}

/// Federal interest expense over receipts, both trailing-twelve-month sums.
///
/// `None` when receipts are zero or missing.
#[must_use]
pub fn interest_expense_ratio(
    ttm_interest_expense: Option<f64>,
    ttm_receipts: Option<f64>,
) -> Option<f64> {
    let receipts = ttm_receipts?;
    if receipts == 0.0 {
        return None;
    }
    Some(ttm_interest_expense? / receipts)
}

/// TIPS-derived inflation breakeven: nominal yield minus real yield, in
/// percent.
#[must_use]
pub fn breakeven_rate_pct(nominal_10y_pct: Option<f64>, tips_10y_pct: Option<f64>) -> Option<f64> {
    Some(nominal_10y_pct? - tips_10y_pct?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hedging_spread() {
        // 4.25% UST - 1.05% JGB - 3.80% hedge cost = -0.60% = -60 bps
        let spread = hedging_spread_bps(Some(4.25), Some(1.05), Some(3.80)).unwrap();
        assert_relative_eq!(spread, -60.0, max_relative = 1e-9);
    }

    #[test]
    fn test_auction_tail_example() {
        // (4.520 - 4.495) * 100 = 2.5 bps
        let tail = auction_tail_bps(Some(4.520), Some(4.495)).unwrap();
        assert_relative_eq!(tail, 2.5, max_relative = 1e-9);
    }

    #[test]
    fn test_average_tail_excludes_incomplete_auctions() {
        let auctions = [
            AuctionYields::new(4.520, 4.495), // 2.5 bps
            AuctionYields {
                high_yield_pct: Some(4.60),
                when_issued_pct: None, // excluded, not zero-filled
            },
            AuctionYields::new(4.305, 4.320), // -1.5 bps (stop-through)
        ];
        let avg = average_auction_tail(&auctions).unwrap();
        assert_relative_eq!(avg, 0.5, max_relative = 1e-9);
    }

    #[test]
    fn test_average_tail_empty_is_none() {
        assert_eq!(average_auction_tail(&[]), None);
        assert_eq!(average_auction_tail(&[AuctionYields::default()]), None);
    }

    #[test]
    fn test_gold_treasury_ratio_zero_denominator() {
        assert_eq!(gold_treasury_ratio(Some(2400.0), Some(0.0)), None);
        let ratio = gold_treasury_ratio(Some(2400.0), Some(90.0)).unwrap();
        assert_relative_eq!(ratio, 26.666_666_666_666_668, max_relative = 1e-12);
    }

    #[test]
    fn test_rate_of_change_round_trip() {
        assert_relative_eq!(
            rate_of_change(Some(27.0), Some(27.0)).unwrap(),
            0.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rate_of_change(Some(27.0 * 1.1), Some(27.0)).unwrap(),
            0.10,
            max_relative = 1e-9
        );
        assert_eq!(rate_of_change(Some(1.0), Some(0.0)), None);
    }

    #[test]
    fn test_interest_expense_ratio_example() {
        let ratio = interest_expense_ratio(Some(950.0), Some(4700.0)).unwrap();
        assert_relative_eq!(ratio, 0.202_127, max_relative = 1e-4);
        assert_eq!(interest_expense_ratio(Some(950.0), Some(0.0)), None);
    }

    #[test]
    fn test_breakeven() {
        let be = breakeven_rate_pct(Some(4.30), Some(2.05)).unwrap();
        assert_relative_eq!(be, 2.25, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_is_a_valid_input() {
        // A 0% yield must not be treated as missing
        let spread = hedging_spread_bps(Some(4.0), Some(0.0), Some(3.0)).unwrap();
        assert_relative_eq!(spread, 100.0, max_relative = 1e-9);
    }

    #[test]
    fn test_null_propagation_every_position() {
        assert_eq!(hedging_spread_bps(None, Some(1.0), Some(1.0)), None);
        assert_eq!(hedging_spread_bps(Some(1.0), None, Some(1.0)), None);
        assert_eq!(hedging_spread_bps(Some(1.0), Some(1.0), None), None);

        assert_eq!(auction_tail_bps(None, Some(4.5)), None);
        assert_eq!(auction_tail_bps(Some(4.5), None), None);

        assert_eq!(gold_treasury_ratio(None, Some(90.0)), None);
        assert_eq!(gold_treasury_ratio(Some(2400.0), None), None);

        assert_eq!(rate_of_change(None, Some(1.0)), None);
        assert_eq!(rate_of_change(Some(1.0), None), None);

        assert_eq!(interest_expense_ratio(None, Some(1.0)), None);
        assert_eq!(interest_expense_ratio(Some(1.0), None), None);

        assert_eq!(breakeven_rate_pct(None, Some(2.0)), None);
        assert_eq!(breakeven_rate_pct(Some(4.0), None), None);
    }

    #[test]
    fn test_no_nan_escapes() {
        for result in [
            gold_treasury_ratio(Some(0.0), Some(0.0)),
            rate_of_change(Some(0.0), Some(0.0)),
            interest_expense_ratio(Some(0.0), Some(0.0)),
        ] {
            assert_eq!(result, None);
        }
    }
}
