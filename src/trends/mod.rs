//! Trend acquisition and normalization pipeline
//!
//! # Architecture
//!
//! ```text
//! request ─► timeframe ─► aggregator ─────────────────────► query ─► response
//!                            │                                (filter + sort)
//!                            ├─ backend.resolve_keywords()
//!                            │     └─ empty / error ─► full fallback set
//!                            └─ backend.resolve_interest() per keyword
//!                                  └─ error / empty series ─► synthetic entry
//! ```
//!
//! Colors and every synthetic number come from one [`SyntheticSource`].

pub mod aggregator;
pub mod backend;
pub mod interest;
pub mod palette;
pub mod query;
pub mod synthetic;
pub mod timeframe;

use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::{Config, PipelineMode};
use crate::error::{Error, Result};
use crate::provider::{HttpTrendProvider, TrendProvider};

pub use aggregator::{Aggregation, DataTier, TrendAggregator};
pub use backend::{LiveBackend, MockBackend, TrendBackend, DEFAULT_TOP_N};
pub use query::{TrendQuery, TrendsReport};
pub use synthetic::SyntheticSource;

/// End-to-end pipeline for `GET /trends`
pub struct TrendPipeline {
    aggregator: TrendAggregator,
}

impl TrendPipeline {
    pub fn new(aggregator: TrendAggregator) -> Self {
        Self { aggregator }
    }

    /// Live pipeline over an arbitrary provider
    pub fn live(
        provider: Arc<dyn TrendProvider>,
        synthetic: SyntheticSource,
        geo: impl Into<String>,
        top_n: usize,
    ) -> Self {
        Self::new(TrendAggregator::new(
            Arc::new(LiveBackend::new(provider, top_n)),
            Arc::new(synthetic),
            geo,
        ))
    }

    /// Mock pipeline
    pub fn mock(synthetic: SyntheticSource) -> Self {
        Self::new(TrendAggregator::new(
            Arc::new(MockBackend::new()),
            Arc::new(synthetic),
            "",
        ))
    }

    /// Validate `config` and select the backend named by `config.pipeline.mode`
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let synthetic = SyntheticSource::new(config.pipeline.seed);

        let pipeline = match config.pipeline.mode {
            PipelineMode::Live => {
                let provider = HttpTrendProvider::new(config.provider.http_config())?;
                Self::live(
                    Arc::new(provider),
                    synthetic,
                    config.provider.geo.clone(),
                    config.pipeline.top_n,
                )
            }
            PipelineMode::Mock => Self::mock(synthetic),
        };

        tracing::info!(mode = %pipeline.mode(), "Trend pipeline ready");
        Ok(pipeline)
    }

    pub fn mode(&self) -> PipelineMode {
        self.aggregator.mode()
    }

    /// Run one request against the local calendar date
    pub async fn run(&self, query: &TrendQuery) -> TrendsReport {
        self.run_at(query, chrono::Local::now().date_naive()).await
    }

    /// Run one request as if today were `today`
    pub async fn run_at(&self, query: &TrendQuery, today: NaiveDate) -> TrendsReport {
        let timeframe = timeframe::resolve_timeframe(
            query.timeframe.as_deref(),
            query.date.as_deref(),
            today,
        );

        let aggregation = self.aggregator.aggregate(timeframe).await;
        let report = query::process(aggregation.entries, query.keyword.as_deref(), timeframe);

        tracing::info!(
            tier = ?aggregation.tier,
            timeframe = %timeframe,
            total = report.total,
            "Trends resolved"
        );

        report
    }

    /// Run on a separate task so a panic anywhere in the pipeline becomes an
    /// [`Error::Internal`] instead of tearing down the connection
    pub async fn run_guarded(self: Arc<Self>, query: TrendQuery) -> Result<TrendsReport> {
        tokio::spawn(async move { self.run(&query).await })
            .await
            .map_err(Error::from)
    }
}
