//! Trend and change calculators over observation series.
//!
//! All windows are calendar-month based. Lookback locates the most recent
//! point dated on-or-before `newest - N months`, scanning newest to
//! oldest, so irregular and gappy observation dates are handled the same
//! as regular ones. There is deliberately no fixed-index shortcut here
//! ("125 trading days back" and friends do not survive weekends, holidays,
//! or missing prints).

use fulcrum_core::types::{Date, Series, TimePoint};

use crate::formulas::{gold_treasury_ratio, rate_of_change};

/// Absolute change over `months` calendar months.
///
/// `newest.value - value at the first point dated <= newest.date - months`.
/// `None` if the series is too short, or either endpoint has no
/// observation.
#[must_use]
pub fn change_over_months(series: &Series, months: u32) -> Option<f64> {
    let (current, previous) = window_endpoints(series, months)?;
    Some(current? - previous?)
}

/// Fractional rate of change over `months` calendar months.
///
/// The same located endpoint pair as [`change_over_months`], fed through
/// [`rate_of_change`]. Used at the 6- and 12-month horizons.
#[must_use]
pub fn roc_over_months(series: &Series, months: u32) -> Option<f64> {
    let (current, previous) = window_endpoints(series, months)?;
    rate_of_change(current, previous)
}

/// Locates the newest point and the first point at least `months` calendar
/// months older. Returns the raw (possibly missing) values at both ends.
fn window_endpoints(series: &Series, months: u32) -> Option<(Option<f64>, Option<f64>)> {
    let newest = series.latest()?;
    let cutoff = newest.date.minus_months(months).ok()?;
    let located = series.point_on_or_before(cutoff)?;
    Some((newest.value, located.value))
}

/// Trailing-twelve-month sum of monthly observations.
///
/// Sums values whose date falls in the open-closed interval
/// `(as_of - 12 months, as_of]`. Points without an observation are
/// skipped. `None` when no point qualifies.
#[must_use]
pub fn ttm_sum(series: &Series, as_of: Date) -> Option<f64> {
    let start = as_of.minus_months(12).ok()?;
    let mut sum = 0.0;
    let mut count = 0usize;
    for point in series {
        if point.date > start && point.date <= as_of {
            if let Some(value) = point.value {
                sum += value;
                count += 1;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some(sum)
}

/// Builds the gold / Treasury-proxy ratio series, aligned on the
/// numerator's observation dates.
///
/// For each numerator point, the denominator is the most recent proxy
/// observation on or before that date. Dates where either side is missing
/// (or the denominator is zero) carry `None`, keeping the gap visible to
/// downstream RoC windows.
#[must_use]
pub fn ratio_series(numerator: &Series, denominator: &Series) -> Series {
    let points: Vec<TimePoint> = numerator
        .iter()
        .map(|p| {
            let den = denominator.value_on_or_before(p.date);
            TimePoint::new(p.date, gold_treasury_ratio(p.value, den))
        })
        .collect();
    // Dates come from an already-validated series, so this cannot collide.
    Series::new(points).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn series(points: &[(&str, Option<f64>)]) -> Series {
        Series::new(
            points
                .iter()
                .map(|(date, value)| TimePoint::new(d(date), *value))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_change_over_six_months_with_gaps() {
        let s = series(&[
            ("2025-07-31", Some(110.0)),
            ("2025-03-15", Some(104.0)),
            // Nothing at exactly 6 months back; nearest older point is used
            ("2024-12-20", Some(100.0)),
        ]);
        // cutoff = 2025-01-31; first point on-or-before is 2024-12-20
        assert_relative_eq!(change_over_months(&s, 6).unwrap(), 10.0, max_relative = 1e-9);
    }

    #[test]
    fn test_change_short_series_is_none() {
        let s = series(&[("2025-07-31", Some(110.0)), ("2025-05-01", Some(104.0))]);
        assert_eq!(change_over_months(&s, 6), None);
        assert_eq!(change_over_months(&Series::empty(), 6), None);
    }

    #[test]
    fn test_change_missing_endpoint_is_none() {
        let s = series(&[
            ("2025-07-31", None),
            ("2024-07-31", Some(100.0)),
        ]);
        assert_eq!(change_over_months(&s, 12), None);

        let s = series(&[
            ("2025-07-31", Some(110.0)),
            ("2024-07-31", None),
        ]);
        assert_eq!(change_over_months(&s, 12), None);
    }

    #[test]
    fn test_roc_over_twelve_months() {
        let s = series(&[
            ("2025-07-31", Some(27.5)),
            ("2025-01-15", Some(26.0)),
            ("2024-07-31", Some(25.0)),
        ]);
        assert_relative_eq!(roc_over_months(&s, 12).unwrap(), 0.10, max_relative = 1e-9);
        // zero base propagates as None, not infinity
        let s = series(&[("2025-07-31", Some(27.5)), ("2024-07-31", Some(0.0))]);
        assert_eq!(roc_over_months(&s, 12), None);
    }

    #[test]
    fn test_ttm_sum_open_closed_window() {
        let s = series(&[
            ("2025-07-31", Some(80.0)),
            ("2025-01-31", Some(75.0)),
            // Exactly 12 months before as_of: excluded (open lower bound)
            ("2024-07-31", Some(70.0)),
            ("2024-08-31", Some(72.0)),
        ]);
        let sum = ttm_sum(&s, d("2025-07-31")).unwrap();
        assert_relative_eq!(sum, 80.0 + 75.0 + 72.0, max_relative = 1e-9);
    }

    #[test]
    fn test_ttm_sum_skips_missing_months() {
        let s = series(&[
            ("2025-07-31", Some(80.0)),
            ("2025-06-30", None),
            ("2025-05-31", Some(75.0)),
        ]);
        assert_relative_eq!(
            ttm_sum(&s, d("2025-07-31")).unwrap(),
            155.0,
            max_relative = 1e-9
        );
        // no qualifying points at all
        assert_eq!(ttm_sum(&s, d("2023-01-01")), None);
    }

    #[test]
    fn test_ratio_series_alignment() {
        let gold = series(&[
            ("2025-07-31", Some(2700.0)),
            ("2025-06-30", Some(2600.0)),
        ]);
        let proxy = series(&[
            // proxy trades less often; 2025-07-31 falls back to 07-15
            ("2025-07-15", Some(90.0)),
            ("2025-06-30", Some(100.0)),
        ]);
        let ratio = ratio_series(&gold, &proxy);
        assert_eq!(ratio.len(), 2);
        assert_relative_eq!(ratio.latest_value().unwrap(), 30.0, max_relative = 1e-9);
        assert_relative_eq!(
            ratio.value_on_or_before(d("2025-06-30")).unwrap(),
            26.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_ratio_series_keeps_gaps_visible() {
        let gold = series(&[("2025-07-31", Some(2700.0)), ("2025-06-30", None)]);
        let proxy = series(&[("2025-06-01", Some(0.0))]);
        let ratio = ratio_series(&gold, &proxy);
        // zero denominator and missing numerator both stay None
        assert_eq!(ratio.latest_value(), None);
        assert_eq!(ratio.value_on_or_before(d("2025-06-30")), None);
    }
}
