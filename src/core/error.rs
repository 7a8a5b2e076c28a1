//! Custom error types for the HATEOAS agent
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for agent operations
#[derive(Error, Debug)]
pub enum HateoasError {
    /// HTTP transport errors (connection refused, invalid URL, timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body parsed as JSON but is not an object, an array or null
    #[error("Invalid response body: expected a JSON object, array or null, got {0}")]
    InvalidBody(String),

    /// LLM provider connection or API errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider could not be reached at all
    #[error("Cannot reach {provider} at {url}. Is it running?")]
    ProviderNotReachable { provider: String, url: String },

    /// Model not available on the provider
    #[error("Model '{0}' is not available on the configured provider")]
    ModelNotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The planner kept calling tools past the configured turn limit
    #[error("Agent stopped after {0} turns without a final answer")]
    MaxTurnsExceeded(usize),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for agent operations
pub type Result<T> = std::result::Result<T, HateoasError>;

impl HateoasError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not-reachable error for a provider endpoint
    pub fn not_reachable(provider: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ProviderNotReachable {
            provider: provider.into(),
            url: url.into(),
        }
    }
}
