//! HTTP API surface for the planning service

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::PlannerError;
use crate::models::{TravelPlan, TripRequest};
use crate::planner::PlannerService;

/// Shared state handed to every request handler
///
/// `planner` is `None` when no API credential was configured; plan requests
/// then fail with 503 while the rest of the service stays up.
#[derive(Clone)]
pub struct AppState {
    pub planner: Option<Arc<PlannerService>>,
}

/// Error body returned to the client
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// HTTP wrapper around `PlannerError` with status mapping
struct ApiError(PlannerError);

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            PlannerError::Config { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PlannerError::Generation { .. } => StatusCode::BAD_GATEWAY,
            PlannerError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            PlannerError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Plan request failed: {}", self.0);
        }

        let body = ErrorBody {
            error: self.0.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(plan_trip))
        .route("/health", get(health))
        .with_state(state)
}

async fn plan_trip(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<TravelPlan>, ApiError> {
    let planner = state
        .planner
        .as_ref()
        .ok_or_else(|| PlannerError::config("Generative AI service is not configured"))?;

    let plan = planner.generate_plan(&request).await?;
    Ok(Json(plan))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "message": "Trip planner API is running" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::TextGenerator;
    use crate::{PlannerError, Result};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    struct MockGenerator {
        response: String,
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(PlannerError::generation("quota exceeded"))
        }
    }

    const CANNED_RESPONSE: &str = "\
## Flight Suggestions
- Mock airline, $500 round trip

## Itinerary
### Day 1: Arrival
- Mock morning walk

## Restaurant Recommendations
- Mock bistro

## Hotel Recommendations
- Mock hotel

## Weather Forecast
- 2025-06-01: Mock sunshine
";

    fn app_with_generator(generator: Arc<dyn TextGenerator>) -> Router {
        let planner = Arc::new(PlannerService::new(generator, Duration::from_secs(5)));
        router(AppState {
            planner: Some(planner),
        })
    }

    fn plan_request(body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/plan")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_plan_endpoint_returns_all_sections() {
        let app = app_with_generator(Arc::new(MockGenerator {
            response: CANNED_RESPONSE.to_string(),
        }));

        let request = plan_request(&serde_json::json!({
            "origin": "NYC",
            "destination": "Paris",
            "budget": "medium",
            "start_date": "2025-06-01",
            "end_date": "2025-06-10",
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["flights"][0], "Mock airline, $500 round trip");
        assert_eq!(body["itinerary"][0]["activities"][0], "Mock morning walk");
        assert_eq!(body["restaurants"][0], "Mock bistro");
        assert_eq!(body["hotels"][0], "Mock hotel");
        assert_eq!(body["weather"][0]["conditions"], "Mock sunshine");
        assert_eq!(body["completeness"]["status"], "full");
    }

    #[tokio::test]
    async fn test_validation_failure_is_bad_request() {
        let app = app_with_generator(Arc::new(MockGenerator {
            response: CANNED_RESPONSE.to_string(),
        }));

        let request = plan_request(&serde_json::json!({
            "origin": "",
            "destination": "Paris",
            "budget": "medium",
            "start_date": "2025-06-01",
            "end_date": "2025-06-10",
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("origin"));
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway() {
        let app = app_with_generator(Arc::new(FailingGenerator));

        let request = plan_request(&serde_json::json!({
            "origin": "NYC",
            "destination": "Paris",
            "budget": "medium",
            "start_date": "2025-06-01",
            "end_date": "2025-06-10",
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_unconfigured_service_is_unavailable() {
        let app = router(AppState { planner: None });

        let request = plan_request(&serde_json::json!({
            "origin": "NYC",
            "destination": "Paris",
            "budget": "medium",
            "start_date": "2025-06-01",
            "end_date": "2025-06-10",
        }));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let app = app_with_generator(Arc::new(MockGenerator {
            response: CANNED_RESPONSE.to_string(),
        }));

        let request = Request::builder()
            .method("POST")
            .uri("/plan")
            .header("content-type", "application/json")
            .body(Body::from("{\"origin\": \"NYC\""))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(AppState { planner: None });

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }
}
