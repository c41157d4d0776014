//! Predictor boundary and the linear PM2.5 model.
//!
//! A model is loaded once, then shared read-only. [`Predictor`] is
//! `Send + Sync` so a host may hand one [`PredictorHandle`] to every
//! request without locking.
//!
//! # Artifact format
//!
//! ```json
//! {
//!   "target": "PM2.5",
//!   "feature_names": ["PM10", "NO", "NO2", "NOx", "NH3", "CO",
//!                     "SO2", "O3", "Benzene", "Toluene", "Xylene"],
//!   "coefficients": [0.31, 0.02, 0.12, 0.04, 0.09, 2.8, 0.03, 0.01, 0.6, 0.1, 0.08],
//!   "intercept": 4.2
//! }
//! ```
//!
//! `feature_names` must list the pollutants in model input order; a
//! reordered artifact is rejected at load time.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FeatureVector, ModelError, ModelResult, Pollutant, PredictionError, FEATURE_COUNT};

/// Anything that maps a feature vector to a PM2.5 estimate.
pub trait Predictor: Send + Sync {
    /// Estimate PM2.5 (µg/m³) for one feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Short description for logs and status endpoints.
    fn describe(&self) -> String {
        "predictor".to_string()
    }
}

/// Shared, immutable predictor.
pub type PredictorHandle = Arc<dyn Predictor>;

/// Load the linear model at `path` as a shareable handle.
pub fn load(path: impl AsRef<Path>) -> ModelResult<PredictorHandle> {
    Ok(Arc::new(LinearModel::load(path)?))
}

/// On-disk representation of a linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Name of the predicted quantity
    #[serde(default = "default_target")]
    pub target: String,
    /// Feature names in input order
    pub feature_names: Vec<String>,
    /// One weight per feature
    pub coefficients: Vec<f64>,
    /// Bias term
    pub intercept: f64,
}

fn default_target() -> String {
    "PM2.5".to_string()
}

/// Ordinary least-squares model: `intercept + Σ wᵢ·xᵢ`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    target: String,
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    /// Create a model from weights in input order.
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> ModelResult<Self> {
        for p in Pollutant::ALL {
            if !coefficients[p.index()].is_finite() {
                return Err(ModelError::NonFinite {
                    parameter: p.name().to_string(),
                });
            }
        }
        if !intercept.is_finite() {
            return Err(ModelError::NonFinite {
                parameter: "intercept".to_string(),
            });
        }
        Ok(Self {
            target: default_target(),
            coefficients,
            intercept,
        })
    }

    /// Validate an artifact against the canonical feature order.
    ///
    /// Names must match [`Pollutant::name`] exactly; aliases are rejected.
    pub fn from_artifact(artifact: ModelArtifact) -> ModelResult<Self> {
        if artifact.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::Arity {
                expected: FEATURE_COUNT,
                found: artifact.feature_names.len(),
            });
        }
        if artifact.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Arity {
                expected: FEATURE_COUNT,
                found: artifact.coefficients.len(),
            });
        }

        for (position, (expected, found)) in Pollutant::ALL
            .iter()
            .zip(artifact.feature_names.iter())
            .enumerate()
        {
            if found != expected.name() {
                return Err(ModelError::FeatureOrder {
                    position,
                    expected: *expected,
                    found: found.clone(),
                });
            }
        }

        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients.copy_from_slice(&artifact.coefficients);

        let mut model = Self::new(coefficients, artifact.intercept)?;
        model.target = artifact.target;
        Ok(model)
    }

    /// Parse and validate an artifact from JSON.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json).map_err(|e| {
            ModelError::Malformed {
                message: e.to_string(),
            }
        })?;
        Self::from_artifact(artifact)
    }

    /// Read an artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ModelError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ModelError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        let model = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            target = %model.target,
            "Loaded linear model"
        );
        Ok(model)
    }

    /// Serializable form of this model.
    pub fn to_artifact(&self) -> ModelArtifact {
        ModelArtifact {
            target: self.target.clone(),
            feature_names: Pollutant::ALL.iter().map(|p| p.name().to_string()).collect(),
            coefficients: self.coefficients.to_vec(),
            intercept: self.intercept,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Weight applied to one pollutant.
    pub fn coefficient(&self, pollutant: Pollutant) -> f64 {
        self.coefficients[pollutant.index()]
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let estimate = self.intercept + features.dot(&self.coefficients);
        if !estimate.is_finite() {
            return Err(PredictionError::NonFinite { value: estimate });
        }
        Ok(estimate)
    }

    fn describe(&self) -> String {
        format!("linear model ({} features → {})", FEATURE_COUNT, self.target)
    }
}
