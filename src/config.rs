//! Configuration management for File Agent.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the completion model.
//! - `GEMINI_MODEL` - Optional. Model identifier. Defaults to `gemini-1.5-flash`.
//! - `GEMINI_ENDPOINT` - Optional. API base URL. Defaults to the Google endpoint.
//! - `SANDBOX_ROOT` - Optional. Directory all tool paths resolve under. Defaults to `example_dir`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_STEPS` - Optional. Maximum agent loop iterations. Defaults to `20`.
//! - `MAX_OUTPUT_TOKENS` - Optional. Per-completion token ceiling. Defaults to `100`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the completion model
    pub api_key: String,

    /// Completion model identifier
    pub model: String,

    /// Base URL of the model API
    pub endpoint: String,

    /// Sandbox root directory for all tool operations
    pub sandbox_root: PathBuf,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_steps: usize,

    /// Per-completion output token ceiling (truncates, never errors)
    pub max_output_tokens: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let endpoint = std::env::var("GEMINI_ENDPOINT")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let sandbox_root = std::env::var("SANDBOX_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("example_dir"));

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        let max_output_tokens = std::env::var("MAX_OUTPUT_TOKENS")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_OUTPUT_TOKENS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            model,
            endpoint,
            sandbox_root,
            host,
            port,
            max_steps,
            max_output_tokens,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, sandbox_root: PathBuf) -> Self {
        Self {
            api_key,
            model,
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            sandbox_root,
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_steps: 20,
            max_output_tokens: 100,
        }
    }
}
