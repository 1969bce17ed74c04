//! External trend-data provider
//!
//! The provider is an opaque service with two capabilities: listing the
//! currently trending searches for a region, and fetching an
//! interest-over-time series for one keyword. Both calls are unreliable
//! and callers must be prepared for any [`ProviderError`].

pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::models::{InterestSeries, Timeframe};

pub use error::ProviderError;
pub use http::{HttpProviderConfig, HttpTrendProvider};

/// Result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Parameters of one interest-over-time request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestQuery {
    pub keyword: String,
    pub timeframe: Timeframe,
    pub geo: String,
}

impl InterestQuery {
    pub fn new(keyword: impl Into<String>, timeframe: Timeframe, geo: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            timeframe,
            geo: geo.into(),
        }
    }
}

/// Call contract of the trend-data provider
#[async_trait]
pub trait TrendProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Trending searches for the configured region, in provider order
    async fn trending_searches(&self) -> ProviderResult<Vec<String>>;

    /// Interest-over-time series for a single keyword
    async fn interest_over_time(&self, query: &InterestQuery) -> ProviderResult<InterestSeries>;
}
