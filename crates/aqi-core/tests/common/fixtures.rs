//! Test fixture loading utilities

use std::path::PathBuf;

use aqi_core::PollutantReading;

/// Path to the demonstration model shipped with the workspace
pub fn shipped_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("models")
        .join("linear_regression_pm25.json")
}

/// The reference reading used by the front-ends' default form
pub fn reference_reading() -> PollutantReading {
    PollutantReading {
        pm10: 100.0,
        no: 50.0,
        no2: 30.0,
        nox: 60.0,
        nh3: 20.0,
        co: 2.0,
        so2: 15.0,
        o3: 40.0,
        benzene: 5.0,
        toluene: 4.0,
        xylene: 3.0,
    }
}

/// A valid artifact body with the given coefficients and intercept
#[allow(dead_code)]
pub fn artifact_json(coefficients: &[f64], intercept: f64) -> String {
    serde_json::json!({
        "target": "PM2.5",
        "feature_names": ["PM10", "NO", "NO2", "NOx", "NH3", "CO",
                          "SO2", "O3", "Benzene", "Toluene", "Xylene"],
        "coefficients": coefficients,
        "intercept": intercept,
    })
    .to_string()
}
