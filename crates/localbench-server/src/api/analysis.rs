use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Extension, Json,
};
use localbench_core::{
    AnalysisOutcome, AnalysisRequest, BusinessProfile, GroundingReference, RatingBand,
};
use localbench_gemini::analyze_competitors;
use serde::Serialize;

use super::{accept_profile, ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
struct ChartRow<'a> {
    name: &'a str,
    rating: f64,
    reviews: u64,
    band: RatingBand,
}

#[derive(Debug, Serialize)]
struct AnalysisData<'a> {
    #[serde(flatten)]
    outcome: &'a AnalysisOutcome,
    map_references: Vec<&'a GroundingReference>,
    charted_competitors: Vec<ChartRow<'a>>,
    competitor_count: usize,
}

impl<'a> AnalysisData<'a> {
    fn from_outcome(outcome: &'a AnalysisOutcome) -> Self {
        let charted_competitors = outcome
            .charted_competitors()
            .into_iter()
            .map(|c| ChartRow {
                name: &c.name,
                rating: c.rating,
                reviews: c.reviews,
                band: RatingBand::for_rating(c.rating),
            })
            .collect();

        Self {
            outcome,
            map_references: outcome.map_references().collect(),
            charted_competitors,
            competitor_count: outcome.competitors().len(),
        }
    }
}

/// Returns the request that would be sent for a profile, without sending it.
pub(super) async fn preview_prompt(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = accept_profile(&req_id.0, payload)?;
    let request = AnalysisRequest::for_profile(&profile, state.client.temperature());

    Ok(Json(ApiResponse {
        data: request,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn run_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<BusinessProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = accept_profile(&req_id.0, payload)?;

    let Some(_permit) = state.gate.try_enter() else {
        return Err(ApiError::new(
            &req_id.0,
            "conflict",
            "an analysis is already in progress",
        ));
    };

    let outcome = analyze_competitors(&state.client, &profile)
        .await
        .map_err(|e| ApiError::new(&req_id.0, "upstream_error", e.to_string()))?;

    tracing::info!(
        request_id = %req_id.0,
        competitors = outcome.competitors().len(),
        references = outcome.grounding().len(),
        "analysis completed"
    );

    let body = serde_json::to_value(ApiResponse {
        data: AnalysisData::from_outcome(&outcome),
        meta: ResponseMeta::new(req_id.0.clone()),
    })
    .map_err(|e| {
        tracing::error!(error = %e, "failed to serialize analysis response");
        ApiError::new(&req_id.0, "internal_error", "failed to encode analysis")
    })?;

    Ok(Json(body))
}
