//! Unified error handling for the trendboard crate
//!
//! Most failures never leave the pipeline: provider trouble is absorbed by
//! synthetic fallback and bad request parameters are normalized. What remains
//! is classified here so the HTTP boundary can tell an unreachable provider
//! from an internal bug, while the client still sees one plain message.
//!
//! - [`TrendErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::provider::ProviderError;

/// Common trait for all trendboard error types
pub trait TrendErrorTrait: std::error::Error {
    /// Check if this error is recoverable (a later request may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The trend-data provider could not be used
    Provider,
    /// Configuration and validation errors
    Config,
    /// Bugs: panics, broken invariants
    Internal,
}

impl ErrorCategory {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Config => "config",
            Self::Internal => "internal",
        }
    }
}

/// Unified error type for the trendboard crate
#[derive(Error, Debug)]
pub enum Error {
    /// Provider-specific errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Pipeline task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrendErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_recoverable(),
            Self::Config(_) | Self::Internal(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Provider(_) => ErrorCategory::Provider,
            Self::Config(_) => ErrorCategory::Config,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Self::Internal(format!("pipeline panicked: {message}"))
        } else {
            Self::Internal("pipeline task cancelled".to_string())
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
