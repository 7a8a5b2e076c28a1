//! LLM module - planner backends
//!
//! Provides abstractions for different LLM backends with Ollama as the default.

pub mod ollama;
pub mod provider;
pub mod traits;

pub use ollama::OllamaClient;
pub use provider::{create_provider, openai::OpenAiClient};
pub use traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};
