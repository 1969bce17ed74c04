//! Prometheus metrics for trendboard
//!
//! This module provides metrics tracking for:
//! - Degradation: how often each fallback tier is served
//! - Provider: failed calls by call and failure kind
//! - API: requests by endpoint and status, request duration
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all trendboard metrics
struct TrendMetrics {
    fallbacks: CounterVec,
    provider_errors: CounterVec,
    api_requests: CounterVec,
    api_duration: HistogramVec,
}

/// Global storage for metrics; `None` when registration failed
static TREND_METRICS: OnceLock<Option<TrendMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static TrendMetrics> {
    TREND_METRICS.get().and_then(Option::as_ref)
}

/// Degradation tier recorded by [`record_fallback`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    /// One keyword got synthetic numbers
    Keyword,
    /// The whole keyword list was replaced
    Full,
}

impl FallbackTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Full => "full",
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// This function should be called once at application startup. Later calls
/// are no-ops. If metric registration fails the error is returned and
/// subsequent metric operations become no-ops.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    let mut failure = None;
    TREND_METRICS.get_or_init(|| match TrendMetrics::register() {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            failure = Some(e);
            None
        }
    });
    failure.map_or(Ok(()), Err)
}

impl TrendMetrics {
    fn register() -> Result<Self, prometheus::Error> {
        Ok(Self {
            fallbacks: register_counter_vec!(
                "trendboard_fallback_total",
                "Synthetic fallbacks served, by tier",
                &["tier"]
            )?,
            provider_errors: register_counter_vec!(
                "trendboard_provider_errors_total",
                "Failed provider calls, by call and failure kind",
                &["call", "kind"]
            )?,
            api_requests: register_counter_vec!(
                "trendboard_requests_total",
                "Total API requests by endpoint and status",
                &["endpoint", "status"]
            )?,
            api_duration: register_histogram_vec!(
                "trendboard_request_duration_seconds",
                "API request duration in seconds",
                &["endpoint"],
                vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
            )?,
        })
    }
}

/// Encode all registered metrics in the Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

// ============================================================================
// Recording
// ============================================================================

/// Record one fallback of the given tier
pub fn record_fallback(tier: FallbackTier) {
    let Some(m) = metrics() else {
        return;
    };
    m.fallbacks.with_label_values(&[tier.as_str()]).inc();
}

/// Record one failed provider call
pub fn record_provider_error(call: &str, kind: &str) {
    let Some(m) = metrics() else {
        return;
    };
    m.provider_errors.with_label_values(&[call, kind]).inc();
}

/// Record one API request
pub fn record_api_request(endpoint: &str, status: u16, duration_secs: f64) {
    let Some(m) = metrics() else {
        return;
    };
    let status_str = status.to_string();
    m.api_requests
        .with_label_values(&[endpoint, status_str.as_str()])
        .inc();
    m.api_duration
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

// ============================================================================
// Tests
// ============================================================================
