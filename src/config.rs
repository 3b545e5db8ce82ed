//! Configuration management for the `TripWeaver` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripWeaver` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Generative text service configuration
    pub generative: GenerativeConfig,
    /// Place lookup service configuration
    pub places: PlacesConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Generative text service settings.
///
/// The API key is optional; without one the pipeline runs entirely on its
/// deterministic paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible chat completions API
    #[serde(default = "default_generative_base_url")]
    pub base_url: String,
    /// Model identifier sent with each completion request
    #[serde(default = "default_generative_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u32,
}

/// Place lookup service settings.
///
/// Without an API key the fixture catalog is used instead of the HTTP
/// lookup service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    /// Base URL for the places API
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_collaborator_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_places_max_retries")]
    pub max_retries: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to serve the planning API on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Search radius in kilometers for place discovery
    #[serde(default = "default_search_radius")]
    pub search_radius_km: u32,
    /// Maximum number of recommended places per trip
    #[serde(default = "default_max_places")]
    pub max_places: u32,
}

// Default value functions
fn default_generative_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generative_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_collaborator_timeout() -> u32 {
    30
}

fn default_places_max_retries() -> u32 {
    3
}

fn default_server_port() -> u16 {
    8001
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_search_radius() -> u32 {
    50
}

fn default_max_places() -> u32 {
    15
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            generative: GenerativeConfig {
                api_key: None,
                base_url: default_generative_base_url(),
                model: default_generative_model(),
                timeout_seconds: default_collaborator_timeout(),
            },
            places: PlacesConfig {
                api_key: None,
                base_url: default_places_base_url(),
                timeout_seconds: default_collaborator_timeout(),
                max_retries: default_places_max_retries(),
            },
            server: ServerConfig {
                port: default_server_port(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            defaults: DefaultsConfig {
                search_radius_km: default_search_radius(),
                max_places: default_max_places(),
            },
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

        // Add environment variable overrides with TRIPWEAVER_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPWEAVER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripweaver").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.generative.base_url.is_empty() {
            self.generative.base_url = default_generative_base_url();
        }
        if self.generative.model.is_empty() {
            self.generative.model = default_generative_model();
        }
        if self.generative.timeout_seconds == 0 {
            self.generative.timeout_seconds = default_collaborator_timeout();
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_collaborator_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.search_radius_km == 0 {
            self.defaults.search_radius_km = default_search_radius();
        }
        if self.defaults.max_places == 0 {
            self.defaults.max_places = default_max_places();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        for (name, api_key) in [
            ("Generative", self.generative.api_key.as_ref()),
            ("Places", self.places.api_key.as_ref()),
        ] {
            let Some(api_key) = api_key else { continue };

            if api_key.is_empty() {
                return Err(PlannerError::config(format!(
                    "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }

            if api_key.len() < 8 {
                return Err(PlannerError::config(format!(
                    "{name} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }

            if api_key.len() > 200 {
                return Err(PlannerError::config(format!(
                    "{name} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.generative.timeout_seconds > 300 {
            return Err(
                PlannerError::config("Generative API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.places.timeout_seconds > 300 {
            return Err(
                PlannerError::config("Places API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.places.max_retries > 10 {
            return Err(PlannerError::config("Places API max retries cannot exceed 10").into());
        }

        if self.defaults.search_radius_km > 500 {
            return Err(PlannerError::config("Search radius cannot exceed 500 km").into());
        }

        if self.defaults.max_places > 100 {
            return Err(PlannerError::config("Maximum places cannot exceed 100").into());
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

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, base_url) in [
            ("Generative", &self.generative.base_url),
            ("Places", &self.places.base_url),
        ] {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
