//! # Fulcrum Engine
//!
//! The stateful layer of the Fulcrum monetary-regime risk monitor.
//!
//! This crate provides:
//! - [`MonitorConfig`]: data-driven thresholds, ladders, stage trigger
//!   cutoffs, and calibration defaults, loadable from TOML
//! - [`assess_stage`]: the rule-based crisis stage classifier
//! - [`MonitorEngine`]: owned mutable state (policy rates, calibrations,
//!   manual basis overrides) with a memoized basis cache that is
//!   invalidated on every administrative write
//! - Indicator evaluation: [`MarketData`] in, classified
//!   [`IndicatorReading`]s and an [`IndicatorSnapshot`] out
//!
//! ## Architecture
//!
//! ```text
//! Series/auctions ─> fulcrum-indicators ─┬─> IndicatorReading (zones)
//!                                        │
//! PolicyRates/Calibration ─> CIP proxy ──┤
//!                                        └─> IndicatorSnapshot ─> assess_stage
//! ```
//!
//! The calculation core below this crate performs no I/O and holds no
//! state; everything mutable lives here, explicitly owned by the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod market;
pub mod snapshot;
pub mod stage;

// Re-exports
pub use config::{
    CalibrationDefaults, FxCurrency, IndicatorThresholds, MonitorConfig, PolicyRates,
    SecondaryThresholds, Stage0Config, StageTriggerConfig,
};
pub use engine::{CalibrationUpdate, MonitorEngine, PolicyRateUpdate};
pub use error::{EngineError, EngineResult};
pub use market::{
    AuxiliarySignals, CoreIndicatorValues, IndicatorReading, MarketData, SecondaryIndicator,
    ThresholdOverrides,
};
pub use snapshot::IndicatorSnapshot;
pub use stage::{assess_stage, CrisisStage, RiskLevel, StageAssessment, TriggeredStage};
