mod analysis;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use localbench_core::{BusinessProfile, DEFAULT_RADIUS, RADIUS_OPTIONS};
use localbench_gemini::GeminiClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::gate::AnalysisGate;
use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<GeminiClient>,
    pub gate: AnalysisGate,
}

impl AppState {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self {
            client,
            gate: AnalysisGate::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    model: String,
    analysis_in_progress: bool,
}

#[derive(Debug, Serialize)]
struct RadiusOptions {
    options: [&'static str; 3],
    default: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Unwraps a JSON profile body and rejects incomplete profiles.
pub(super) fn accept_profile(
    request_id: &str,
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> Result<BusinessProfile, ApiError> {
    let Json(profile) =
        payload.map_err(|e| ApiError::new(request_id, "bad_request", e.body_text()))?;

    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::new(
            request_id,
            "validation_error",
            format!("missing required fields: {}", missing.join(", ")),
        ));
    }

    Ok(profile)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/radius-options", get(radius_options))
        .route("/api/v1/prompt", post(analysis::preview_prompt))
        .route("/api/v1/analysis", post(analysis::run_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            model: state.client.model().to_string(),
            analysis_in_progress: state.gate.is_busy(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

async fn radius_options(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: RadiusOptions {
            options: RADIUS_OPTIONS,
            default: DEFAULT_RADIUS,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
