//! One competitor analysis: build the prompt, invoke the model once, extract.

use localbench_core::{extract_outcome, AnalysisOutcome, AnalysisRequest, BusinessProfile};
use thiserror::Error;

use crate::client::GeminiClient;
use crate::error::GeminiError;

/// The only failure message shown to users.
pub const INVOCATION_FAILURE_MESSAGE: &str =
    "Failed to analyze the market. Check the address and try again.";

/// Failure of [`analyze_competitors`].
///
/// Displays as [`INVOCATION_FAILURE_MESSAGE`]; the underlying
/// [`GeminiError`] stays reachable through `source()` for logs.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{}", INVOCATION_FAILURE_MESSAGE)]
    Invocation(#[source] GeminiError),
}

/// Runs the full analysis for `profile`.
///
/// Makes exactly one model call. Irregular replies are never an error (see
/// [`extract_outcome`]); only a failed call is, and then nothing is
/// extracted.
///
/// # Errors
///
/// Returns [`AnalysisError::Invocation`] if the model call fails for any
/// reason (network, auth, quota, malformed response).
pub async fn analyze_competitors(
    client: &GeminiClient,
    profile: &BusinessProfile,
) -> Result<AnalysisOutcome, AnalysisError> {
    let request = AnalysisRequest::for_profile(profile, client.temperature());

    tracing::info!(
        business = %profile.business_name,
        segment = %profile.segment,
        radius = %profile.radius,
        model = %client.model(),
        "requesting competitor analysis"
    );

    let reply = client.generate(&request).await.map_err(|e| {
        tracing::error!(error = %e, business = %profile.business_name, "model invocation failed");
        AnalysisError::Invocation(e)
    })?;

    let outcome = extract_outcome(&reply.text, reply.grounding);

    tracing::info!(
        business = %profile.business_name,
        competitors = outcome.competitors().len(),
        map_references = outcome.map_references().count(),
        "competitor analysis complete"
    );

    Ok(outcome)
}
