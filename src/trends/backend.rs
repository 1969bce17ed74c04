//! Keyword and interest backends
//!
//! A backend supplies the two capabilities the aggregator needs: the working
//! set of candidate keywords, and one entry per keyword. Exactly one backend
//! is active per process, chosen from configuration at startup.
//!
//! - [`LiveBackend`] asks the external provider for both.
//! - [`MockBackend`] serves a static keyword list with synthetic numbers.

use async_trait::async_trait;
use std::sync::Arc;

use super::interest::resolve_interest;
use super::synthetic::{SyntheticBounds, SyntheticSource, MOCK_KEYWORDS};
use crate::config::PipelineMode;
use crate::models::{Timeframe, TrendEntry};
use crate::provider::{InterestQuery, ProviderResult, TrendProvider};

/// Number of trending keywords taken from the provider by default
pub const DEFAULT_TOP_N: usize = 20;

/// Capability set shared by the live and mock pipelines
#[async_trait]
pub trait TrendBackend: Send + Sync {
    /// Which pipeline variant this is
    fn mode(&self) -> PipelineMode;

    /// Candidate keywords in source order; an empty list means "none available"
    async fn resolve_keywords(&self) -> ProviderResult<Vec<String>>;

    /// One entry for `keyword`; never fails
    async fn resolve_interest(
        &self,
        keyword: &str,
        timeframe: Timeframe,
        geo: &str,
        synthetic: &SyntheticSource,
    ) -> TrendEntry;
}

/// Backend that calls the external trend provider
pub struct LiveBackend {
    provider: Arc<dyn TrendProvider>,
    top_n: usize,
}

impl LiveBackend {
    pub fn new(provider: Arc<dyn TrendProvider>, top_n: usize) -> Self {
        Self { provider, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }
}

#[async_trait]
impl TrendBackend for LiveBackend {
    fn mode(&self) -> PipelineMode {
        PipelineMode::Live
    }

    async fn resolve_keywords(&self) -> ProviderResult<Vec<String>> {
        let mut keywords = self.provider.trending_searches().await?;
        keywords.truncate(self.top_n);

        tracing::debug!(
            provider = self.provider.name(),
            count = keywords.len(),
            "Resolved trending keywords"
        );

        Ok(keywords)
    }

    async fn resolve_interest(
        &self,
        keyword: &str,
        timeframe: Timeframe,
        geo: &str,
        synthetic: &SyntheticSource,
    ) -> TrendEntry {
        let query = InterestQuery::new(keyword, timeframe, geo);
        resolve_interest(self.provider.as_ref(), &query, synthetic).await
    }
}

/// Backend that never leaves the process
#[derive(Debug, Default, Clone, Copy)]
pub struct MockBackend;

impl MockBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TrendBackend for MockBackend {
    fn mode(&self) -> PipelineMode {
        PipelineMode::Mock
    }

    async fn resolve_keywords(&self) -> ProviderResult<Vec<String>> {
        Ok(MOCK_KEYWORDS.iter().map(|kw| kw.to_string()).collect())
    }

    async fn resolve_interest(
        &self,
        keyword: &str,
        _timeframe: Timeframe,
        _geo: &str,
        synthetic: &SyntheticSource,
    ) -> TrendEntry {
        synthetic.entry(keyword, &SyntheticBounds::mock())
    }
}
