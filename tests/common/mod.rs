//! Common test utilities

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use trendboard::models::{InterestPoint, InterestSeries};
use trendboard::provider::{InterestQuery, ProviderError, ProviderResult, TrendProvider};

/// In-process provider with scripted answers
#[derive(Default)]
pub struct StubProvider {
    /// `None` makes the trending call fail
    pub keywords: Option<Vec<String>>,
    /// Series per keyword; keywords not listed fail with a timeout
    pub series: HashMap<String, Vec<Option<f64>>>,
    pub interest_calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_keywords(keywords: &[&str]) -> Self {
        Self {
            keywords: Some(keywords.iter().map(|s| s.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn series(mut self, keyword: &str, values: &[Option<f64>]) -> Self {
        self.series.insert(keyword.to_string(), values.to_vec());
        self
    }

    pub fn interest_calls(&self) -> usize {
        self.interest_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn trending_searches(&self) -> ProviderResult<Vec<String>> {
        self.keywords
            .clone()
            .ok_or_else(|| ProviderError::Unavailable("stub offline".to_string()))
    }

    async fn interest_over_time(&self, query: &InterestQuery) -> ProviderResult<InterestSeries> {
        self.interest_calls.fetch_add(1, Ordering::SeqCst);
        let values = self
            .series
            .get(&query.keyword)
            .ok_or(ProviderError::Timeout)?;
        Ok(make_series(&query.keyword, values))
    }
}

/// Provider whose every call panics
#[allow(dead_code)]
pub struct PanickingProvider;

#[async_trait]
impl TrendProvider for PanickingProvider {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn trending_searches(&self) -> ProviderResult<Vec<String>> {
        panic!("trending list corrupted")
    }

    async fn interest_over_time(&self, _query: &InterestQuery) -> ProviderResult<InterestSeries> {
        panic!("series corrupted")
    }
}

/// Hourly series starting now
pub fn make_series(keyword: &str, values: &[Option<f64>]) -> InterestSeries {
    let start = Utc::now();
    let points = values
        .iter()
        .enumerate()
        .map(|(i, value)| InterestPoint {
            time: start + Duration::hours(i as i64),
            value: *value,
        })
        .collect();
    InterestSeries::new(keyword, points)
}

/// Date string `days` days before today (local calendar)
#[allow(dead_code)]
pub fn days_ago(days: i64) -> String {
    (chrono::Local::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
