//! Per-keyword interest resolution
//!
//! Turns one keyword into a [`TrendEntry`] using the provider's
//! interest-over-time series. Any failure for the keyword (transport, status,
//! decoding, or an empty series) is contained here and replaced by a
//! synthetic entry, so siblings are never affected.

use crate::metrics;
use crate::models::{InterestSeries, TrendEntry};
use crate::provider::{InterestQuery, TrendProvider};

use super::synthetic::{SyntheticBounds, SyntheticSource};

/// Average and peak interest of one series, on the 0..=100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterestSummary {
    pub average: u8,
    pub peak: u8,
}

impl InterestSummary {
    /// Summarize a series over its present samples
    ///
    /// An undefined statistic (no present samples) becomes 0. Values are
    /// floored and clamped into 0..=100.
    pub fn from_series(series: &InterestSeries) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0_f64;
        let mut max: Option<f64> = None;

        for value in series.values() {
            count += 1;
            sum += value;
            max = Some(max.map_or(value, |m| m.max(value)));
        }

        let mean = (count > 0).then(|| sum / count as f64);

        Self {
            average: to_scale(mean),
            peak: to_scale(max),
        }
    }
}

/// Floor onto the 0..=100 scale; undefined becomes 0
fn to_scale(value: Option<f64>) -> u8 {
    match value {
        Some(v) if v.is_finite() => v.floor().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

/// Resolve one keyword into an entry, falling back to synthetic numbers
pub async fn resolve_interest(
    provider: &dyn TrendProvider,
    query: &InterestQuery,
    synthetic: &SyntheticSource,
) -> TrendEntry {
    match provider.interest_over_time(query).await {
        Ok(series) if !series.is_empty() => {
            let summary = InterestSummary::from_series(&series);
            let entry = TrendEntry::new(
                query.keyword.as_str(),
                summary.average,
                summary.peak,
                synthetic.color(),
            );

            if entry.has_inverted_peak() {
                tracing::debug!(
                    keyword = %entry.keyword,
                    interest = entry.interest,
                    max_interest = entry.max_interest,
                    "Peak interest below average"
                );
            }

            entry
        }
        Ok(_) => {
            tracing::warn!(
                keyword = %query.keyword,
                timeframe = %query.timeframe,
                "Empty interest series, using synthetic values"
            );
            metrics::record_fallback(metrics::FallbackTier::Keyword);
            synthetic.entry(&query.keyword, &SyntheticBounds::keyword_fallback())
        }
        Err(e) => {
            tracing::warn!(
                keyword = %query.keyword,
                provider = provider.name(),
                error = %e,
                "Error processing keyword, using synthetic values"
            );
            metrics::record_provider_error("interest_over_time", e.kind());
            metrics::record_fallback(metrics::FallbackTier::Keyword);
            synthetic.entry(&query.keyword, &SyntheticBounds::keyword_fallback())
        }
    }
}
