//! trendboard - Trending keyword service for dashboard widgets
//!
//! Serves a ranked list of trending search keywords with interest metrics,
//! fronting an external trend-data provider and degrading to synthetic data
//! whenever the provider is unavailable, slow, or incomplete.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`provider`] - External trend-data provider contract and HTTP client
//! - [`trends`] - Acquisition and normalization pipeline with fallback tiers
//! - [`api`] - HTTP router, handlers, and server
//! - [`models`] - Core data structures and types
//! - [`metrics`] - Prometheus metrics
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use trendboard::config::{Config, PipelineMode};
//! use trendboard::trends::{TrendPipeline, TrendQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::from_env()?;
//!     config.pipeline.mode = PipelineMode::Mock;
//!     let pipeline = TrendPipeline::from_config(&config)?;
//!     let report = pipeline.run(&TrendQuery::default().with_keyword("bali")).await;
//!     println!("{}", report.total);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod trends;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::TrendServer;
    pub use crate::config::{Config, PipelineMode};
    pub use crate::error::{Error, ErrorCategory, Result, TrendErrorTrait};
    pub use crate::models::{Timeframe, TrendEntry};
    pub use crate::provider::{TrendProvider, ProviderError};
    pub use crate::trends::{SyntheticSource, TrendPipeline, TrendQuery, TrendsReport};
}

// Direct re-exports for convenience
pub use models::{Timeframe, TrendEntry};
