//! Error types for fulcrum-core.
//!
//! Configuration mistakes reject with a descriptive reason. Missing market
//! data is never an error: it travels as `None` through the calculation
//! pipeline and surfaces as `Zone::Unknown`.

use thiserror::Error;

/// Error type for core type construction and validation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Two observations share a date within one series
    #[error("duplicate observation date {date} in series")]
    DuplicateDate {
        /// The offending date (ISO format).
        date: String,
    },

    /// A threshold band was configured with neither bound
    #[error("threshold band for zone '{zone}' has neither min nor max")]
    EmptyBand {
        /// Name of the zone whose band is malformed.
        zone: String,
    },

    /// A flat ladder was configured out of ascending order
    #[error("ladder thresholds must ascend: warning {warning} <= danger {danger} <= critical {critical}")]
    LadderOutOfOrder {
        /// Warning cutoff.
        warning: f64,
        /// Danger cutoff.
        danger: f64,
        /// Critical cutoff.
        critical: f64,
    },

    /// A threshold bound was not a finite number
    #[error("threshold bound for zone '{zone}' is not finite: {value}")]
    NonFiniteBound {
        /// Name of the zone whose band is malformed.
        zone: String,
        /// The offending bound.
        value: f64,
    },
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
