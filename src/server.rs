use crate::error::HabitatError;
use crate::logic::MonitoringService;
use crate::models::{Coordinates, MonitoringReport};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MonitoringService>,
}

impl AppState {
    pub fn new(service: MonitoringService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/monitoring", get(monitoring))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Raw query values; parsed by `Coordinates::parse` so bad input gets a JSON 400.
#[derive(Debug, Deserialize)]
struct MonitoringQuery {
    lat: Option<String>,
    lng: Option<String>,
}

async fn monitoring(
    State(state): State<AppState>,
    query: Result<Query<MonitoringQuery>, QueryRejection>,
) -> Result<Json<MonitoringReport>, HabitatError> {
    let Query(query) = query.map_err(|e| HabitatError::InvalidCoordinates(e.body_text()))?;
    let coords = Coordinates::parse(query.lat.as_deref(), query.lng.as_deref())?;
    Ok(Json(state.service.report(coords).await))
}

impl HabitatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HabitatError::InvalidCoordinates(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HabitatError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::SeededSynthetic;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = MonitoringService::offline(Arc::new(SeededSynthetic::new(42)));
        create_router(AppState::new(service))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_check_responds() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn monitoring_returns_full_report() {
        let (status, body) = get_json("/monitoring?lat=20.5937&lng=78.9629").await;
        assert_eq!(status, StatusCode::OK);

        for key in [
            "report_id",
            "generated_at",
            "location",
            "metrics",
            "health_breakdown",
            "health_calculation",
            "risk_advisory",
            "history",
            "alerts",
            "data_sources",
        ] {
            assert!(!body[key].is_null(), "missing {}", key);
        }

        let score = body["metrics"]["health_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(body["health_breakdown"].as_array().unwrap().len(), 6);
        assert!(body["risk_advisory"]["recommendedSpecies"].is_array());
        assert!(body["risk_advisory"]["solutions"].is_array());
        assert_eq!(body["history"].as_array().unwrap().len(), 30);
        assert_eq!(body["data_sources"]["weather"], "fallback");
        assert_eq!(body["data_sources"]["satellite"], "synthetic");
        assert!(!body["alerts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_coordinates_are_rejected() {
        let (status, body) = get_json("/monitoring").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("lat"));

        let (status, _) = get_json("/monitoring?lat=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_coordinates_are_rejected() {
        let (status, body) = get_json("/monitoring?lat=abc&lng=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = get_json("/monitoring?lat=NaN&lng=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_string_gets_json_error() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/monitoring?lat=1&lat=2&lng=3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("lat"));
    }

    #[tokio::test]
    async fn out_of_range_coordinates_are_rejected() {
        let (status, _) = get_json("/monitoring?lat=91&lng=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json("/monitoring?lat=0&lng=-180.5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json("/monitoring?lat=-90&lng=180").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let err = HabitatError::DataSourceUnavailable("down".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = HabitatError::InvalidCoordinates("bad".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
