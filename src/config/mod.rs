//! Configuration management for trendboard
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::provider::HttpProviderConfig;
use crate::trends::DEFAULT_TOP_N;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Trend provider configuration (live mode)
    pub provider: ProviderConfig,

    /// Pipeline configuration
    pub pipeline: PipelineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable CORS for the dashboard origin
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

/// Trend provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider gateway base URL
    pub base_url: String,

    /// Region for trending searches
    pub region: String,

    /// Geography code for interest queries
    pub geo: String,

    /// Host language
    pub language: String,

    /// Timezone offset in minutes
    pub tz_offset_minutes: i32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Provider category filter
    pub category: u32,

    /// Provider property filter
    pub property: String,
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Which pipeline variant serves requests
    pub mode: PipelineMode,

    /// Number of trending keywords taken from the provider
    pub top_n: usize,

    /// Seed for synthetic data; random when absent
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

/// Pipeline variant, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Query the external provider
    #[default]
    Live,
    /// Serve static keywords with synthetic numbers
    Mock,
}

impl PipelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "mock" => Ok(Self::Mock),
            other => Err(ConfigError::InvalidValue {
                field: "mode".to_string(),
                reason: format!("Unknown pipeline mode: {other} (expected live or mock)"),
            }),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let http = HttpProviderConfig::default();
        Self {
            base_url: http.base_url,
            region: http.region,
            geo: String::from("ID"),
            language: http.language,
            tz_offset_minutes: http.tz_offset_minutes,
            request_timeout_secs: http.timeout.as_secs(),
            category: http.category,
            property: http.property,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::Live,
            top_n: DEFAULT_TOP_N,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl ProviderConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for the HTTP provider client
    pub fn http_config(&self) -> HttpProviderConfig {
        HttpProviderConfig {
            base_url: self.base_url.clone(),
            region: self.region.clone(),
            language: self.language.clone(),
            tz_offset_minutes: self.tz_offset_minutes,
            category: self.category,
            property: self.property.clone(),
            timeout: self.request_timeout(),
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let bind_address = match std::env::var("TRENDBOARD_BIND_ADDRESS") {
            Ok(addr) => addr
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid TRENDBOARD_BIND_ADDRESS: {addr}"))?,
            Err(_) => defaults.server.bind_address,
        };

        let mode = match std::env::var("TRENDBOARD_MODE") {
            Ok(mode) => mode.parse::<PipelineMode>()?,
            Err(_) => defaults.pipeline.mode,
        };

        let config = Self {
            server: ServerConfig {
                bind_address,
                enable_cors: env_parse("TRENDBOARD_ENABLE_CORS")
                    .unwrap_or(defaults.server.enable_cors),
                enable_request_logging: env_parse("TRENDBOARD_REQUEST_LOGGING")
                    .unwrap_or(defaults.server.enable_request_logging),
            },
            provider: ProviderConfig {
                base_url: std::env::var("TRENDBOARD_PROVIDER_URL")
                    .unwrap_or(defaults.provider.base_url),
                region: std::env::var("TRENDBOARD_REGION").unwrap_or(defaults.provider.region),
                geo: std::env::var("TRENDBOARD_GEO").unwrap_or(defaults.provider.geo),
                language: std::env::var("TRENDBOARD_LANGUAGE")
                    .unwrap_or(defaults.provider.language),
                tz_offset_minutes: env_parse("TRENDBOARD_TZ_OFFSET")
                    .unwrap_or(defaults.provider.tz_offset_minutes),
                request_timeout_secs: env_parse("TRENDBOARD_REQUEST_TIMEOUT")
                    .unwrap_or(defaults.provider.request_timeout_secs),
                category: defaults.provider.category,
                property: defaults.provider.property,
            },
            pipeline: PipelineConfig {
                mode,
                top_n: env_parse("TRENDBOARD_TOP_N").unwrap_or(defaults.pipeline.top_n),
                seed: env_parse("TRENDBOARD_SEED"),
            },
            logging: LoggingConfig {
                level: std::env::var("TRENDBOARD_LOG_LEVEL").unwrap_or(defaults.logging.level),
                format: std::env::var("TRENDBOARD_LOG_FORMAT")
                    .unwrap_or(defaults.logging.format),
            },
        };

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.pipeline.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.top_n".to_string(),
                reason: "Must take at least 1 keyword".to_string(),
            });
        }

        if self.pipeline.mode == PipelineMode::Live {
            if self.provider.request_timeout_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "provider.request_timeout_secs".to_string(),
                    reason: "Timeout must be greater than 0".to_string(),
                });
            }

            url::Url::parse(&self.provider.base_url).map_err(|e| ConfigError::InvalidValue {
                field: "provider.base_url".to_string(),
                reason: e.to_string(),
            })?;

            if self.provider.geo.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "provider.geo".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    InvalidValue { field: String, reason: String },
    MissingField { field: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            Self::MissingField { field } => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
