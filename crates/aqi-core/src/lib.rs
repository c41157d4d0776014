//! aqi-core - PM2.5 assessment from pollutant readings
//!
//! This crate holds the deterministic part of the air-quality pipeline:
//!
//! - **Feature vectors**: eleven named pollutant readings, validated and
//!   converted to the positional vector a regression model expects
//! - **Classification**: PM2.5 estimate to one of six AQI categories using
//!   the PM2.5 breakpoint table
//! - **Alert tiers**: coarse INFO / WARNING / CRITICAL grouping of categories
//! - **Predictor boundary**: the [`Predictor`] trait plus a linear model
//!   loaded from a JSON artifact
//!
//! # Pipeline
//!
//! ```text
//! PollutantReading → FeatureVector → Predictor → estimate → AqiCategory → AlertTier
//! ```
//!
//! The predictor is passed explicitly to [`compute_pm25_assessment`]; nothing
//! in this crate holds process-wide state.
//!
//! ```
//! use aqi_core::{classify, AlertTier, AqiCategory};
//!
//! let category = classify(35.4).unwrap();
//! assert_eq!(category, AqiCategory::Moderate);
//! assert_eq!(category.alert_tier(), AlertTier::Info);
//! ```

pub mod alert;
pub mod assessment;
pub mod category;
pub mod config;
pub mod error;
pub mod features;
pub mod pollutant;
pub mod predictor;

pub use alert::*;
pub use assessment::*;
pub use category::*;
pub use config::*;
pub use error::*;
pub use features::*;
pub use pollutant::*;
pub use predictor::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
