//! Core domain logic for localbench.
//!
//! Holds the business profile model, the prompt builder that asks the model
//! for a narrative plus a sentinel-delimited competitor block, and the
//! extractor that splits the model's reply back into narrative text and
//! competitor records. Nothing in this crate performs I/O.

pub mod analysis;
pub mod app_config;
pub mod config;
pub mod extract;
pub mod profile;
pub mod prompt;

pub use analysis::{AnalysisOutcome, CompetitorRecord, GroundingReference, RatingBand};
pub use app_config::{AppConfig, Environment};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use extract::{extract_outcome, parse_competitor_line, parse_data_segment, FALLBACK_NARRATIVE};
pub use profile::{BusinessProfile, DEFAULT_RADIUS, RADIUS_OPTIONS};
pub use prompt::{
    build_prompt, AnalysisRequest, GroundingTool, DATA_END, DATA_START, DEFAULT_TEMPERATURE,
};

use thiserror::Error;

/// Errors raised while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is set but its value cannot be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
