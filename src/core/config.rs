//! Configuration management for the agent
//!
//! Supports environment variables, config files, and runtime overrides.
//! Priority: CLI args > env vars > config file > defaults.
//!
//! Config file location: ~/.config/hateoas-agent/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::core::error::{HateoasError, Result};

/// Default tracing filter: library noise at WARN, the HTTP tool layer at INFO
pub const DEFAULT_LOG_FILTER: &str = "warn,hateoas_agent::http=info";

/// Main configuration for the agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which planner backend to use
    pub provider: ProviderType,
    /// Ollama configuration
    pub ollama: OllamaConfig,
    /// OpenAI-compatible endpoint configuration
    pub openai: OpenAiConfig,
    /// HTTP tool layer configuration
    pub http: HttpConfig,
    /// Agent behavior configuration
    pub agent: AgentConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Supported planner backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Local Ollama server
    #[default]
    Ollama,
    /// OpenAI or any chat-completions compatible endpoint
    OpenAi,
}

impl FromStr for ProviderType {
    type Err = HateoasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(HateoasError::config(format!("Unknown provider: {}", other))),
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Ollama => write!(f, "ollama"),
            ProviderType::OpenAi => write!(f, "openai"),
        }
    }
}

/// Ollama server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Host address (default: localhost)
    pub host: String,
    /// Port number (default: 11434)
    pub port: u16,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Model used for tool calling
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 11434,
            timeout_secs: 120,
            model: "qwen3:8b".to_string(),
        }
    }
}

impl OllamaConfig {
    /// Get the full Ollama API URL
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// OpenAI-compatible endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Base URL including the version prefix
    pub base_url: String,
    /// API key; usually supplied through OPENAI_API_KEY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Model used for tool calling
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            timeout_secs: 120,
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// HTTP tool layer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Optional request timeout; unset means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Optional User-Agent header for tool requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Known API entry point the agent starts from
    pub entry_point: String,
    /// Maximum reasoning loop turns before stopping
    /// Default: 10
    pub max_turns: usize,
    /// Prompt used when none is given on the command line
    pub default_prompt: String,
    /// Replaces the built-in navigation instructions when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Sampling temperature passed to the planner; unset uses the backend default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            entry_point: "http://localhost:8080/".to_string(),
            max_turns: 10,
            default_prompt: "Explore the API from its entry point and summarize the resources \
                             and actions it offers."
                .to_string(),
            system_prompt: None,
            temperature: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive; RUST_LOG takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hateoas-agent")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let mut config = if Self::config_file().exists() {
            Self::load_from_file()?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        let content = fs::read_to_string(&config_path)
            .map_err(|e| HateoasError::config(format!("Failed to read config: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| HateoasError::config(format!("Failed to parse config: {}", e)))
    }

    /// Apply environment-style overrides from a key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("HATEOAS_PROVIDER") {
            self.provider = provider.parse()?;
        }
        if let Some(model) = lookup("HATEOAS_MODEL") {
            self.set_model(model);
        }
        if let Some(entry_point) = lookup("HATEOAS_ENTRY_POINT") {
            self.agent.entry_point = entry_point;
        }
        if let Some(temperature) = lookup("HATEOAS_TEMPERATURE") {
            let value = temperature.parse().map_err(|_| {
                HateoasError::config(format!("Invalid HATEOAS_TEMPERATURE: {}", temperature))
            })?;
            self.agent.temperature = Some(value);
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            self.ollama.host = host;
        }
        if let Some(port) = lookup("OLLAMA_PORT") {
            self.ollama.port = port
                .parse()
                .map_err(|_| HateoasError::config(format!("Invalid OLLAMA_PORT: {}", port)))?;
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.openai.base_url = base_url;
        }
        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.openai.api_key = Some(api_key);
        }
        Ok(())
    }

    /// Check values that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        self.entry_point_url()?;
        if self.agent.max_turns == 0 {
            return Err(HateoasError::config("agent.max_turns must be at least 1"));
        }
        if let Some(t) = self.agent.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(HateoasError::config(format!(
                    "agent.temperature must be between 0 and 2, got {}",
                    t
                )));
            }
        }
        Ok(())
    }

    /// The entry point parsed as an absolute URL
    pub fn entry_point_url(&self) -> Result<Url> {
        Url::parse(&self.agent.entry_point).map_err(|e| {
            HateoasError::config(format!(
                "Invalid entry point '{}': {}",
                self.agent.entry_point, e
            ))
        })
    }

    /// Model name for the active provider
    pub fn model(&self) -> &str {
        match self.provider {
            ProviderType::Ollama => &self.ollama.model,
            ProviderType::OpenAi => &self.openai.model,
        }
    }

    /// Update the model of the active provider
    pub fn set_model(&mut self, model: impl Into<String>) {
        match self.provider {
            ProviderType::Ollama => self.ollama.model = model.into(),
            ProviderType::OpenAi => self.openai.model = model.into(),
        }
    }
}
