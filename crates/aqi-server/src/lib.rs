//! aqi-server - HTTP adapter for PM2.5 assessment
//!
//! Thin JSON surface over `aqi-core`. The predictor is loaded before the
//! router is built, so a running server always has a model.

pub mod http;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use aqi_core::{AqiConfig, ModelResult, Predictor, PredictorHandle};

/// Shared application state
pub struct AppState {
    pub predictor: PredictorHandle,
}

impl AppState {
    pub fn new(predictor: PredictorHandle) -> Self {
        Self { predictor }
    }

    /// Load the configured model. Fails if it cannot be read or validated.
    pub fn from_config(config: &AqiConfig) -> ModelResult<Self> {
        let predictor = aqi_core::load(&config.model.path)?;
        tracing::info!("Serving {}", predictor.describe());
        Ok(Self::new(predictor))
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assess", post(http::assess))
        .route("/scale", get(http::get_scale))
        .route("/pollutants", get(http::list_pollutants))
        .route("/status", get(http::get_status))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("aqi server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use aqi_core::{LinearModel, ModelError, FEATURE_COUNT};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let model = LinearModel::new([0.5; FEATURE_COUNT], 0.0).unwrap();
        Arc::new(AppState::new(Arc::new(model)))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assess_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/assess")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn readings(value: f64) -> serde_json::Value {
        serde_json::json!({
            "PM10": value, "NO": value, "NO2": value, "NOx": value, "NH3": value,
            "CO": value, "SO2": value, "O3": value, "Benzene": value,
            "Toluene": value, "Xylene": value
        })
    }

    #[tokio::test]
    async fn test_assess_ok() {
        let app = create_router(test_state());
        let request = assess_request(serde_json::json!({
            "readings": readings(10.0),
            "city": "delhi"
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["estimate"], 55.0);
        assert_eq!(json["category"], "Unhealthy for Sensitive Groups");
        assert_eq!(json["severity_rank"], 2);
        assert_eq!(json["color"], "orange");
        assert_eq!(json["alert_tier"], "WARNING");
        assert_eq!(json["location"], "Delhi");
        assert!(json["advisory"].as_str().unwrap().starts_with("Delhi"));
    }

    #[tokio::test]
    async fn test_assess_negative_reading_is_unprocessable() {
        let app = create_router(test_state());
        let request = assess_request(serde_json::json!({ "readings": readings(-1.0) }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_assess_blank_city_is_unprocessable() {
        let app = create_router(test_state());
        let request = assess_request(serde_json::json!({
            "readings": readings(1.0),
            "city": "   "
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_assess_missing_field_is_rejected() {
        let app = create_router(test_state());
        let request = assess_request(serde_json::json!({ "readings": { "PM10": 1.0 } }));

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_scale() {
        let app = create_router(test_state());
        let request = Request::builder().uri("/scale").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let bands = json["bands"].as_array().unwrap();
        assert_eq!(bands.len(), 6);
        assert_eq!(bands[0]["upper"], 12.0);
        assert!(bands[5]["upper"].is_null());
    }

    #[tokio::test]
    async fn test_status_lists_feature_order() {
        let app = create_router(test_state());
        let request = Request::builder().uri("/status").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["features"][0], "PM10");
        assert_eq!(json["features"][10], "Xylene");
    }

    #[test]
    fn test_from_config_refuses_missing_model() {
        let mut config = AqiConfig::default();
        config.model.path = PathBuf::from("/no/such/dir/model.json");

        let result = AppState::from_config(&config);
        assert!(matches!(result, Err(ModelError::NotFound { .. })));
    }

    #[test]
    fn test_from_config_loads_shipped_model() {
        let mut config = AqiConfig::default();
        config.model.path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../models/linear_regression_pm25.json");

        let state = AppState::from_config(&config).unwrap_or_else(|e| panic!("{e}"));
        assert!(state.predictor.describe().contains("PM2.5"));
    }
}
