//! Error types for aqi-core
//!
//! Three failure classes reach callers:
//! - Invalid input (recover by re-prompting)
//! - Model unavailable (fatal at startup)
//! - Prediction failure (surfaced, never retried)

use std::path::PathBuf;
use thiserror::Error;

use crate::Pollutant;

/// Main error type for aqi operations
#[derive(Error, Debug)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum AqiError {
    /// Malformed, missing, non-numeric or negative input
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Predictor artifact missing or corrupt
    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    /// Predictor failed on an otherwise valid vector
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to caller-supplied input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A pollutant was not supplied
    #[error("Missing reading for '{field}'")]
    MissingField { field: String },

    /// A name that matches no known pollutant
    #[error("Unknown pollutant '{field}'")]
    UnknownField { field: String },

    /// The same pollutant was supplied twice
    #[error("Duplicate reading for '{field}'")]
    DuplicateField { field: String },

    /// NaN or infinite reading
    #[error("Reading for {pollutant} is not a finite number: {value}")]
    NotFinite { pollutant: Pollutant, value: f64 },

    /// Negative concentration
    #[error("Reading for {pollutant} is negative: {value}")]
    Negative { pollutant: Pollutant, value: f64 },

    /// PM2.5 estimate that cannot be classified
    #[error("PM2.5 estimate is not a number")]
    NanEstimate,

    /// Blank location name
    #[error("Location name must not be empty")]
    EmptyLocation,

    /// Structurally malformed request payload
    #[error("Malformed input: {0}")]
    Malformed(String),
}

/// Errors loading the regression artifact
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Artifact file does not exist
    #[error("Model artifact not found: {path}")]
    NotFound { path: PathBuf },

    /// Artifact could not be read
    #[error("Cannot read model artifact {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Artifact could not be deserialized
    #[error("Model artifact is malformed: {message}")]
    Malformed { message: String },

    /// Wrong number of features or coefficients
    #[error("Model expects {found} features, this build supplies {expected}")]
    Arity { expected: usize, found: usize },

    /// Feature at a position does not match the canonical order
    #[error("Model feature {position} is '{found}', expected '{expected}'")]
    FeatureOrder {
        position: usize,
        expected: Pollutant,
        found: String,
    },

    /// Coefficient or intercept is NaN or infinite
    #[error("Model parameter '{parameter}' is not finite")]
    NonFinite { parameter: String },
}

/// Errors raised during inference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// Model produced NaN or infinity
    #[error("Model produced a non-finite estimate: {value}")]
    NonFinite { value: f64 },

    /// Failure reported by a predictor backend
    #[error("Predictor backend error: {0}")]
    Backend(String),
}

/// Errors related to configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config {path}: {message}")]
    Io { path: PathBuf, message: String },

    /// Config file could not be parsed
    #[error("Cannot parse config: {0}")]
    Parse(String),

    /// Value out of range or inconsistent
    #[error("{0}")]
    Invalid(String),
}

/// Result type alias for aqi operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Result type alias for input validation
pub type InputResult<T> = std::result::Result<T, InputError>;

/// Result type alias for model loading
pub type ModelResult<T> = std::result::Result<T, ModelError>;
