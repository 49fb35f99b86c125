//! Gemini `generateContent` client with Maps and Search grounding.
//!
//! [`GeminiClient`] sends one prompt with its grounding tools and returns the
//! reply text plus grounding references. [`analyze_competitors`] wires it to
//! the prompt builder and extractor in `localbench-core`.

pub mod client;
pub mod error;
pub mod pipeline;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, ModelReply};
pub use error::GeminiError;
pub use pipeline::{analyze_competitors, AnalysisError, INVOCATION_FAILURE_MESSAGE};
