//! Error types for the monitoring engine.
//!
//! Only caller mistakes reject: malformed calibration requests, unknown
//! currencies, bad threshold configuration. Missing market data is the
//! expected common case and never surfaces here - it flows through the
//! calculation pipeline as `None`.

use thiserror::Error;

use fulcrum_core::CoreError;

/// Error type for engine configuration and administrative operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A calibration or override named a currency the engine does not track
    #[error("unknown currency '{0}' (expected one of: eur, jpy)")]
    UnknownCurrency(String),

    /// A rate update carried a non-finite value
    #[error("invalid rate for {name}: {value}")]
    InvalidRate {
        /// Which rate was being set.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A calibration update carried a non-finite parameter
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Threshold configuration failed validation
    #[error(transparent)]
    Threshold(#[from] CoreError),

    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("cannot parse config file: {0}")]
    ConfigParse(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownCurrency("chf".to_string());
        assert!(err.to_string().contains("chf"));
        assert!(err.to_string().contains("eur, jpy"));

        let err = EngineError::InvalidRate {
            name: "ecb",
            value: f64::NAN,
        };
        assert!(err.to_string().contains("ecb"));
    }
}
