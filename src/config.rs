//! Configuration management for the trip planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the trip planner
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// External generative-AI service configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key, supplied via config file or environment
    pub api_key: Option<String>,
    /// Base URL for the Gemini API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model identifier used for plan generation
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Deadline for a single plan generation in seconds
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u64,
    /// Sampling temperature passed to the model
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,
    /// Token budget for the generated plan
    #[serde(default = "default_gemini_max_tokens")]
    pub max_output_tokens: u32,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the web server binds to
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory holding the static frontend
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_timeout() -> u64 {
    60
}

fn default_gemini_temperature() -> f32 {
    0.7
}

fn default_gemini_max_tokens() -> u32 {
    2048
}

fn default_server_port() -> u16 {
    8000
}

fn default_frontend_dir() -> String {
    "frontend".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_gemini_timeout(),
            temperature: default_gemini_temperature(),
            max_output_tokens: default_gemini_max_tokens(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPPLANNER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPPLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripplanner").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the Gemini API credential if present
    ///
    /// A missing key is allowed at startup so the server can come up and
    /// report 503 on plan requests, matching the upstream service contract.
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.gemini.api_key {
            if api_key.is_empty() {
                return Err(PlannerError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(PlannerError::config(
                    "Gemini API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.gemini.timeout_seconds == 0 {
            return Err(PlannerError::config("Generation timeout must be at least 1 second").into());
        }

        if self.gemini.timeout_seconds > 300 {
            return Err(PlannerError::config("Generation timeout cannot exceed 300 seconds").into());
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(PlannerError::config("Temperature must be between 0.0 and 2.0").into());
        }

        if self.gemini.max_output_tokens == 0 {
            return Err(PlannerError::config("Max output tokens must be positive").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(
                PlannerError::config("Gemini base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.gemini.model.is_empty() {
            return Err(PlannerError::config("Gemini model cannot be empty").into());
        }

        Ok(())
    }
}
