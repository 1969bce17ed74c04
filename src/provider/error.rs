//! Error types for the trend-data provider
//!
//! Every failure mode of the external provider maps onto one variant here.
//! None of them reach the HTTP caller: the pipeline absorbs them through
//! synthetic fallback.

use thiserror::Error;

/// Errors that can occur while talking to the trend-data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status code
    #[error("Server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Response body did not match the expected shape
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Base URL or endpoint could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Provider is not reachable in this deployment
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Short stable label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::ServerError(_) => "status",
            Self::Timeout => "timeout",
            Self::Decode(_) => "decode",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Unavailable(_) => "unavailable",
        }
    }

    /// Whether a later request could plausibly succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout | Self::Unavailable(_) => true,
            Self::ServerError(code) => *code == 429 || *code >= 500,
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ProviderError::Timeout.kind(), "timeout");
        assert_eq!(ProviderError::ServerError(503).kind(), "status");
        assert_eq!(ProviderError::Decode("x".into()).kind(), "decode");
    }

    #[test]
    fn test_recoverable_status_codes() {
        assert!(ProviderError::ServerError(503).is_recoverable());
        assert!(ProviderError::ServerError(429).is_recoverable());
        assert!(!ProviderError::ServerError(404).is_recoverable());
        assert!(!ProviderError::Decode("bad".into()).is_recoverable());
    }
}
