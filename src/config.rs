//! Configuration management for `TripLens`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripLensError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripLens` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripLensConfig {
    /// Place search API configuration
    pub places: PlacesConfig,
    /// Generative text API configuration
    pub generative: GenerativeConfig,
    /// Image cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server settings
    pub server: ServerConfig,
}

/// Place search (text search + photo media) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// API key sent in the `X-Goog-Api-Key` header and the photo URL
    pub api_key: Option<String>,
    /// Base URL for the search endpoint
    pub base_url: String,
    /// Base URL that photo resource names are appended to
    pub photo_base_url: String,
    pub max_height_px: u32,
    pub max_width_px: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Generative text API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
}

/// Image cache settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached images; unbounded when unset
    pub max_entries: Option<usize>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Maximum accepted request body in KB
    pub body_limit_kb: usize,
}

// Default value functions
fn default_places_base_url() -> String {
    "https://places.googleapis.com/v1".to_string()
}

fn default_photo_max_height() -> u32 {
    1000
}

fn default_photo_max_width() -> u32 {
    1900
}

fn default_timeout() -> u32 {
    30
}

fn default_generative_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_generative_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_generative_max_retries() -> u32 {
    2
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit_kb() -> usize {
    512
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            photo_base_url: default_places_base_url(),
            max_height_px: default_photo_max_height(),
            max_width_px: default_photo_max_width(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generative_base_url(),
            model: default_generative_model(),
            timeout_seconds: default_timeout(),
            max_retries: default_generative_max_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            body_limit_kb: default_body_limit_kb(),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TripLensConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(non_empty_env("TRIPLENS_CONFIG").map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // TRIPLENS_PLACES__API_KEY -> places.api_key
        builder = builder.add_source(
            Environment::with_prefix("TRIPLENS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripLensConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("triplens").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.places.api_key.is_none() {
            self.places.api_key = non_empty_env("GOOGLE_PLACE_API_KEY");
        }
        if self.places.base_url.is_empty() {
            self.places.base_url = default_places_base_url();
        }
        if self.places.photo_base_url.is_empty() {
            self.places.photo_base_url = default_places_base_url();
        }
        if self.places.max_height_px == 0 {
            self.places.max_height_px = default_photo_max_height();
        }
        if self.places.max_width_px == 0 {
            self.places.max_width_px = default_photo_max_width();
        }
        if self.places.timeout_seconds == 0 {
            self.places.timeout_seconds = default_timeout();
        }
        if self.generative.api_key.is_none() {
            self.generative.api_key =
                non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"));
        }
        if self.generative.base_url.is_empty() {
            self.generative.base_url = default_generative_base_url();
        }
        if self.generative.model.is_empty() {
            self.generative.model = default_generative_model();
        }
        if self.generative.timeout_seconds == 0 {
            self.generative.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit_kb();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Keys are optional; without them every lookup degrades to its fallback.
    pub fn validate_api_keys(&self) -> Result<()> {
        for (label, key) in [
            ("Places", &self.places.api_key),
            ("Generative", &self.generative.api_key),
        ] {
            if let Some(key) = key {
                if key.trim().is_empty() {
                    return Err(TripLensError::config(format!(
                        "{label} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.places.timeout_seconds > 300 || self.generative.timeout_seconds > 300 {
            return Err(TripLensError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.generative.max_retries > 10 {
            return Err(TripLensError::config("Generative API max retries cannot exceed 10").into());
        }

        for (label, px) in [
            ("maxHeightPx", self.places.max_height_px),
            ("maxWidthPx", self.places.max_width_px),
        ] {
            if !(1..=4800).contains(&px) {
                return Err(TripLensError::config(format!(
                    "Photo {label} must be between 1 and 4800"
                ))
                .into());
            }
        }

        if self.cache.max_entries == Some(0) {
            return Err(TripLensError::config(
                "Cache max entries must be positive; leave it unset for an unbounded cache",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripLensError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripLensError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (label, url) in [
            ("Places API base URL", &self.places.base_url),
            ("Places photo base URL", &self.places.photo_base_url),
            ("Generative API base URL", &self.generative.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripLensError::config(format!(
                    "{label} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TripLensConfig::default();
        assert_eq!(config.places.base_url, "https://places.googleapis.com/v1");
        assert_eq!(config.places.max_height_px, 1000);
        assert_eq!(config.places.max_width_px, 1900);
        assert_eq!(config.generative.max_retries, 2);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.cache.max_entries.is_none());
        assert!(config.places.api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(TripLensConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_blank_api_key() {
        let mut config = TripLensConfig::default();
        config.places.api_key = Some("   ".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Places API key"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripLensConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripLensConfig::default();
        config.generative.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = TripLensConfig::default();
        config.cache.max_entries = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_url() {
        let mut config = TripLensConfig::default();
        config.places.photo_base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("photo base URL"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = TripLensConfig::default();
        config.places.base_url.clear();
        config.places.max_width_px = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.places.base_url, "https://places.googleapis.com/v1");
        assert_eq!(config.places.max_width_px, 1900);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = TripLensConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("triplens"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
