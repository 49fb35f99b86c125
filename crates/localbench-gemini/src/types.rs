//! Gemini `generateContent` wire types.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! response is ignored. Field names follow the REST API's camelCase.

use localbench_core::{AnalysisRequest, GroundingReference, GroundingTool};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Body of `POST /v1beta/models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub tools: Vec<ToolSpec>,
    pub generation_config: GenerationConfig,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn user request carrying the prompt, tools and temperature.
    #[must_use]
    pub fn from_analysis(request: &'a AnalysisRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            tools: request.tools.iter().copied().map(ToolSpec::from).collect(),
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

/// Tool declaration. Serializes as `{"googleMaps": {}}` or `{"googleSearch": {}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolSpec {
    GoogleMaps(EmptyConfig),
    GoogleSearch(EmptyConfig),
}

/// Tools are enabled with default settings, i.e. an empty object.
#[derive(Debug, Default, Serialize)]
pub struct EmptyConfig {}

impl From<GroundingTool> for ToolSpec {
    fn from(tool: GroundingTool) -> Self {
        match tool {
            GroundingTool::GoogleMaps => Self::GoogleMaps(EmptyConfig::default()),
            GroundingTool::GoogleSearch => Self::GoogleSearch(EmptyConfig::default()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, skipping thought parts.
    ///
    /// Empty when the model produced no candidate or no text.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Grounding references of the first candidate, in response order.
    #[must_use]
    pub fn grounding_references(&self) -> Vec<GroundingReference> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(GroundingChunk::to_reference)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }

    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    /// Set on reasoning parts that are not part of the answer.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding source: a web page, a map place, or neither.
#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
    #[serde(default)]
    pub maps: Option<MapsChunk>,
}

impl GroundingChunk {
    /// Converts to the domain type. Chunks of other kinds (e.g. retrieved
    /// context) have no counterpart and yield `None`.
    #[must_use]
    pub fn to_reference(&self) -> Option<GroundingReference> {
        if let Some(maps) = &self.maps {
            return Some(GroundingReference::Map {
                uri: maps.uri.clone(),
                title: maps.title.clone(),
                place_id: maps.place_id.clone(),
            });
        }
        self.web.as_ref().map(|web| GroundingReference::Web {
            uri: web.uri.clone(),
            title: web.title.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WebChunk {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_tools_as_empty_objects() {
        let analysis = AnalysisRequest {
            prompt: "hello".to_string(),
            tools: vec![GroundingTool::GoogleMaps, GroundingTool::GoogleSearch],
            temperature: 0.5,
        };
        let json = serde_json::to_value(GenerateContentRequest::from_analysis(&analysis))
            .expect("serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "tools": [{ "googleMaps": {} }, { "googleSearch": {} }],
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "planning...", "thought": true },
                        { "text": "## Overview\n" },
                        { "text": "Busy street." }
                    ]
                }
            }]
        }))
        .expect("deserialize");

        assert_eq!(response.text(), "## Overview\nBusy street.");
    }

    #[test]
    fn text_is_empty_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .expect("deserialize");

        assert_eq!(response.text(), "");
        assert_eq!(response.block_reason(), Some("SAFETY"));
        assert!(response.grounding_references().is_empty());
    }

    #[test]
    fn grounding_chunks_convert_to_tagged_references() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "ok" }] },
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        { "maps": { "uri": "https://maps.google.com/?cid=1", "title": "Bakery One", "placeId": "places/1" } },
                        { "web": { "uri": "https://example.com", "title": "Example" } },
                        { "retrievedContext": { "uri": "gs://bucket/doc" } },
                        { "maps": { "uri": "https://maps.google.com/?cid=2" } }
                    ]
                }
            }]
        }))
        .expect("deserialize");

        assert_eq!(response.finish_reason(), Some("STOP"));
        assert_eq!(
            response.grounding_references(),
            vec![
                GroundingReference::Map {
                    uri: "https://maps.google.com/?cid=1".to_string(),
                    title: "Bakery One".to_string(),
                    place_id: Some("places/1".to_string()),
                },
                GroundingReference::Web {
                    uri: "https://example.com".to_string(),
                    title: "Example".to_string(),
                },
                GroundingReference::Map {
                    uri: "https://maps.google.com/?cid=2".to_string(),
                    title: String::new(),
                    place_id: None,
                },
            ]
        );
    }
}
