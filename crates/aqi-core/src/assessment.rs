//! End-to-end PM2.5 assessment.

use serde::{Deserialize, Serialize};

use crate::{
    build, classify, AlertTier, AqiCategory, Location, PollutantReading, PredictionError,
    Predictor, Result,
};

/// Outcome of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Assessment {
    /// Predicted PM2.5 in µg/m³
    pub estimate: f64,
    pub category: AqiCategory,
    pub alert_tier: AlertTier,
}

impl Assessment {
    /// Classify an estimate that has already been produced.
    pub fn from_estimate(estimate: f64) -> Result<Self> {
        let category = classify(estimate)?;
        Ok(Self {
            estimate,
            category,
            alert_tier: category.alert_tier(),
        })
    }

    /// False for negative estimates, which still classify as Good.
    pub fn is_physically_plausible(&self) -> bool {
        self.estimate >= 0.0
    }

    /// Health message for the category.
    pub fn message(&self) -> &'static str {
        self.category.message()
    }

    /// Advisory sentence for the alert tier.
    pub fn advisory(&self, location: Option<&Location>) -> String {
        self.alert_tier.advisory(location)
    }

    /// One-line headline, e.g. `Predicted PM2.5: 42.17 µg/m³ (Unhealthy for Sensitive Groups)`.
    pub fn headline(&self) -> String {
        format!(
            "Predicted PM2.5: {:.2} µg/m³ ({})",
            self.estimate, self.category
        )
    }
}

/// Validate `reading`, run `predictor`, classify the estimate and map the
/// alert tier.
pub fn compute_pm25_assessment(
    predictor: &dyn Predictor,
    reading: &PollutantReading,
) -> Result<Assessment> {
    let features = build(reading)?;

    let unusual = reading.unusual_readings();
    if !unusual.is_empty() {
        tracing::warn!(pollutants = ?unusual, "Readings above typical monitoring range");
    }

    let estimate = predictor.predict(&features)?;
    if !estimate.is_finite() {
        return Err(PredictionError::NonFinite { value: estimate }.into());
    }

    let assessment = Assessment::from_estimate(estimate)?;
    if !assessment.is_physically_plausible() {
        tracing::warn!(
            estimate,
            "Model predicted a negative PM2.5 concentration; classified as {}",
            assessment.category
        );
    }
    tracing::debug!(
        estimate,
        category = %assessment.category,
        tier = %assessment.alert_tier,
        "Computed PM2.5 assessment"
    );
    Ok(assessment)
}
