//! # Fulcrum Core
//!
//! Core types and zone classification for the Fulcrum monetary-regime
//! risk monitor.
//!
//! This crate provides the foundational building blocks used throughout
//! Fulcrum:
//!
//! - **Types**: `Date`, `TimePoint`/`Series`, indicator identity and config
//! - **Zones**: threshold bands, ladders, and the zone evaluator
//!
//! ## Design Philosophy
//!
//! - **Missing is not zero**: a missing observation is `None` and stays
//!   `None` through every calculation; a `0.0` is a real value
//! - **Explicit Over Implicit**: zone priority is an ordered constant,
//!   never incidental map iteration order
//!
//! ## Example
//!
//! ```rust
//! use fulcrum_core::prelude::*;
//!
//! let thresholds = IndicatorConfig::defaults_for(IndicatorId::AuctionTail).thresholds;
//! let result = evaluate_zone(Some(3.5), &thresholds);
//! assert_eq!(result.zone, Zone::Danger);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod types;
pub mod zones;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Date, IndicatorConfig, IndicatorId, Series, TimePoint,
    };
    pub use crate::zones::{
        evaluate_ladder, evaluate_zone, LadderThresholds, ThresholdBand, ThresholdSet, Zone,
        ZoneResult, ZONE_PRIORITY,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, IndicatorConfig, IndicatorId, Series, TimePoint};
pub use zones::{evaluate_ladder, evaluate_zone, Zone, ZoneResult};
