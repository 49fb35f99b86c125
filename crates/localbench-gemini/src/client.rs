//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! One call per analysis: no retries, no streaming. Non-2xx answers surface as
//! [`GeminiError::Api`] with the message from Gemini's error envelope.

use std::time::{Duration, Instant};

use localbench_core::{AnalysisRequest, AppConfig, GroundingReference};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Everything needed to reach the model.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.clone(),
            temperature: config.temperature,
            timeout_secs: config.request_timeout_secs,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Text and citations from one model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    /// Reply text; empty when the model returned none.
    pub text: String,
    pub grounding: Vec<GroundingReference>,
    pub finish_reason: Option<String>,
}

/// Client for the Gemini REST API.
///
/// Construction validates the configuration up front so a missing key fails
/// at startup instead of on the first request.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
    temperature: f32,
}

impl GeminiClient {
    /// # Errors
    ///
    /// - [`GeminiError::MissingApiKey`] if the key is blank.
    /// - [`GeminiError::InvalidConfig`] if the model is blank or the base URL
    ///   does not parse.
    /// - [`GeminiError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let model = config.model.trim();
        let model = model.strip_prefix("models/").unwrap_or(model);
        if model.is_empty() {
            return Err(GeminiError::InvalidConfig("model must not be empty".to_string()));
        }

        let endpoint = build_endpoint(&config.base_url, model)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("localbench/0.1 (competitor-benchmarking)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            endpoint,
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sampling temperature requests should be built with.
    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Sends `request` to the model and returns its reply.
    ///
    /// A reply without candidates (e.g. a blocked prompt) is not an error: it
    /// comes back with empty text.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure or timeout.
    /// - [`GeminiError::Api`] on a non-2xx status.
    /// - [`GeminiError::Deserialize`] if a 2xx body is not the expected shape.
    pub async fn generate(&self, request: &AnalysisRequest) -> Result<ModelReply, GeminiError> {
        let body = GenerateContentRequest::from_analysis(request);
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        if let Some(reason) = parsed.block_reason() {
            tracing::warn!(model = %self.model, block_reason = reason, "prompt was blocked");
        }

        let reply = ModelReply {
            text: parsed.text(),
            grounding: parsed.grounding_references(),
            finish_reason: parsed.finish_reason().map(str::to_owned),
        };

        tracing::debug!(
            model = %self.model,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            text_len = reply.text.len(),
            grounding = reply.grounding.len(),
            finish_reason = reply.finish_reason.as_deref().unwrap_or("none"),
            "generateContent completed"
        );

        Ok(reply)
    }
}

/// Builds `{base}/v1beta/models/{model}:generateContent`.
fn build_endpoint(base_url: &str, model: &str) -> Result<Url, GeminiError> {
    // Exactly one trailing slash so `join` appends instead of replacing the
    // last path segment.
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    let base = Url::parse(&normalised).map_err(|e| {
        GeminiError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
    })?;
    base.join(&format!("v1beta/models/{model}:generateContent"))
        .map_err(|e| GeminiError::InvalidConfig(format!("invalid model '{model}': {e}")))
}

/// Pulls `error.message` out of an error body, falling back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
