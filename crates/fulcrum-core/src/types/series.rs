//! Observation series types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// A single dated observation.
///
/// `value` is `None` when no observation exists for the date. A missing
/// observation is distinct from `0.0` and must stay missing through every
/// downstream calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Observation date.
    pub date: Date,
    /// Observed value, or `None` when no observation exists.
    pub value: Option<f64>,
}

impl TimePoint {
    /// Creates a new time point.
    #[must_use]
    pub fn new(date: Date, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// A date-ordered observation series, held newest-first.
///
/// Construction sorts points descending by date and rejects duplicate
/// dates. Series from upstream sources are often gappy and irregular;
/// lookups are therefore date-based, never index-based.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series(Vec<TimePoint>);

impl Series {
    /// Creates a series from unordered points.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateDate` if two points share a date.
    pub fn new(mut points: Vec<TimePoint>) -> CoreResult<Self> {
        points.sort_by(|a, b| b.date.cmp(&a.date));
        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(CoreError::DuplicateDate {
                    date: pair[0].date.to_string(),
                });
            }
        }
        Ok(Self(points))
    }

    /// Creates an empty series (e.g. for a failed upstream fetch).
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The newest point, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&TimePoint> {
        self.0.first()
    }

    /// The newest observed value, if the newest point has one.
    #[must_use]
    pub fn latest_value(&self) -> Option<f64> {
        self.latest().and_then(|p| p.value)
    }

    /// The most recent point dated on or before `date`.
    ///
    /// Scans from newest toward oldest; tolerates gaps and irregular
    /// observation dates.
    #[must_use]
    pub fn point_on_or_before(&self, date: Date) -> Option<&TimePoint> {
        self.0.iter().find(|p| p.date <= date)
    }

    /// The most recent observed value on or before `date`.
    #[must_use]
    pub fn value_on_or_before(&self, date: Date) -> Option<f64> {
        self.point_on_or_before(date).and_then(|p| p.value)
    }

    /// Iterates points newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &TimePoint> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a TimePoint;
    type IntoIter = std::slice::Iter<'a, TimePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
