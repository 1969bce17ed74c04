//! Trend aggregation across all candidate keywords
//!
//! The aggregator drives the backend: it asks for the keyword list, then
//! resolves each keyword one after another. Two degradation tiers apply:
//!
//! - a keyword whose series fails gets synthetic numbers (inside the backend)
//! - a missing or failed keyword list yields the full synthetic fallback set

use std::sync::Arc;

use super::backend::TrendBackend;
use super::synthetic::SyntheticSource;
use crate::config::PipelineMode;
use crate::metrics;
use crate::models::{Timeframe, TrendEntry};

/// Where the entries of an aggregation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTier {
    /// Keyword list from the provider (entries may still be per-keyword fallbacks)
    Provider,
    /// Static mock list
    Mock,
    /// Provider gave no keyword list, full synthetic set served
    FullFallback,
}

/// Unsorted aggregation result
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub entries: Vec<TrendEntry>,
    pub tier: DataTier,
}

/// Drives keyword resolution and interest resolution for one request
pub struct TrendAggregator {
    backend: Arc<dyn TrendBackend>,
    synthetic: Arc<SyntheticSource>,
    geo: String,
}

impl TrendAggregator {
    pub fn new(
        backend: Arc<dyn TrendBackend>,
        synthetic: Arc<SyntheticSource>,
        geo: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            synthetic,
            geo: geo.into(),
        }
    }

    pub fn mode(&self) -> PipelineMode {
        self.backend.mode()
    }

    /// Aggregate entries for `timeframe`, in source order
    pub async fn aggregate(&self, timeframe: Timeframe) -> Aggregation {
        let keywords = match self.backend.resolve_keywords().await {
            Ok(keywords) if !keywords.is_empty() => keywords,
            Ok(_) => {
                tracing::warn!(mode = %self.mode(), "No trending keywords available, serving fallback set");
                return self.full_fallback();
            }
            Err(e) => {
                tracing::warn!(
                    mode = %self.mode(),
                    error = %e,
                    "Error getting trending keywords, serving fallback set"
                );
                metrics::record_provider_error("trending_searches", e.kind());
                return self.full_fallback();
            }
        };

        let mut entries = Vec::with_capacity(keywords.len());
        for keyword in &keywords {
            let entry = self
                .backend
                .resolve_interest(keyword, timeframe, &self.geo, &self.synthetic)
                .await;
            entries.push(entry);
        }

        let tier = match self.mode() {
            PipelineMode::Live => DataTier::Provider,
            PipelineMode::Mock => DataTier::Mock,
        };

        tracing::debug!(count = entries.len(), tier = ?tier, timeframe = %timeframe, "Aggregated trends");

        Aggregation { entries, tier }
    }

    fn full_fallback(&self) -> Aggregation {
        metrics::record_fallback(metrics::FallbackTier::Full);
        Aggregation {
            entries: self.synthetic.fallback_set(),
            tier: DataTier::FullFallback,
        }
    }
}
