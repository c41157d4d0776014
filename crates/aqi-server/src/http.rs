//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use aqi_core::{
    aqi_scale, compute_pm25_assessment, AqiError, Location, Pollutant, PollutantReading,
    Predictor, ScaleBand, SCALE_AXIS_MAX,
};

use crate::AppState;

/// Request to assess one set of readings
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub readings: PollutantReading,
    #[serde(default)]
    pub city: Option<String>,
}

/// Assessment result
#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub estimate: f64,
    pub category: String,
    pub severity_rank: u8,
    pub color: String,
    pub message: String,
    pub alert_tier: String,
    pub advisory: String,
    pub location: Option<String>,
    pub physically_plausible: bool,
}

fn error_status(err: &AqiError) -> StatusCode {
    match err {
        AqiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AqiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AqiError::Prediction(_) | AqiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: AqiError) -> (StatusCode, String) {
    let status = error_status(&err);
    if status.is_server_error() {
        tracing::error!("Assessment failed: {}", err);
    } else {
        tracing::debug!("Rejected assessment request: {}", err);
    }
    (status, err.to_string())
}

/// Assess pollutant readings
pub async fn assess(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, (StatusCode, String)> {
    let location = request
        .city
        .as_deref()
        .map(Location::new)
        .transpose()
        .map_err(|e| reject(e.into()))?;

    let assessment =
        compute_pm25_assessment(state.predictor.as_ref(), &request.readings).map_err(reject)?;

    Ok(Json(AssessResponse {
        estimate: assessment.estimate,
        category: assessment.category.to_string(),
        severity_rank: assessment.category.severity_rank(),
        color: assessment.category.color().token().to_string(),
        message: assessment.message().to_string(),
        alert_tier: assessment.alert_tier.to_string(),
        advisory: assessment.advisory(location.as_ref()),
        location: location.map(String::from),
        physically_plausible: assessment.is_physically_plausible(),
    }))
}

/// Reference scale for charting
#[derive(Debug, Serialize)]
pub struct ScaleResponse {
    pub bands: Vec<ScaleBandResponse>,
    pub axis_max: f64,
}

#[derive(Debug, Serialize)]
pub struct ScaleBandResponse {
    pub category: String,
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: String,
    pub hex: String,
}

impl From<ScaleBand> for ScaleBandResponse {
    fn from(band: ScaleBand) -> Self {
        let color = band.category.color();
        Self {
            category: band.category.to_string(),
            lower: band.lower,
            upper: band.upper,
            color: color.token().to_string(),
            hex: format!("#{}", color.hex()),
        }
    }
}

/// Get the AQI scale
pub async fn get_scale() -> Json<ScaleResponse> {
    Json(ScaleResponse {
        bands: aqi_scale().into_iter().map(ScaleBandResponse::from).collect(),
        axis_max: SCALE_AXIS_MAX,
    })
}

/// Summary of a model input for form rendering
#[derive(Debug, Serialize)]
pub struct PollutantSummary {
    pub name: String,
    pub label: String,
    pub unit: String,
    pub description: String,
    pub default_value: f64,
    pub typical_max: f64,
}

/// List model inputs in order
pub async fn list_pollutants() -> Json<Vec<PollutantSummary>> {
    let pollutants = Pollutant::ALL
        .iter()
        .map(|p| PollutantSummary {
            name: p.name().to_string(),
            label: p.label().to_string(),
            unit: p.unit().to_string(),
            description: p.description().to_string(),
            default_value: p.default_value(),
            typical_max: p.typical_max(),
        })
        .collect();
    Json(pollutants)
}

/// Get system status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let features: Vec<&str> = Pollutant::ALL.iter().map(|p| p.name()).collect();
    Json(serde_json::json!({
        "model": state.predictor.describe(),
        "features": features,
    }))
}
