use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No API key was configured.
    #[error("Gemini API key is missing")]
    MissingApiKey,

    /// Model name or base URL cannot be used to build a request.
    #[error("invalid Gemini client configuration: {0}")]
    InvalidConfig(String),
}
