// Core data structures for trendboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One trending keyword with its interest metrics, as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub keyword: String,
    pub interest: u8,     // Average relative search volume, 0..=100
    pub max_interest: u8, // Peak relative search volume, 0..=100
    pub color: String,    // One of the palette tokens
}

impl TrendEntry {
    /// Create an entry, clamping both metrics into 0..=100
    pub fn new(
        keyword: impl Into<String>,
        interest: u8,
        max_interest: u8,
        color: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            interest: interest.min(100),
            max_interest: max_interest.min(100),
            color: color.into(),
        }
    }

    /// Whether the keyword contains `needle` (already lowercased)
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.keyword.to_lowercase().contains(needle_lower)
    }

    /// Peak below average; kept as reported, never corrected
    pub fn has_inverted_peak(&self) -> bool {
        self.max_interest < self.interest
    }
}

/// Canonical timeframe buckets understood by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "today 1-d")]
    OneDay,
    #[serde(rename = "today 7-d")]
    SevenDays,
    #[serde(rename = "today 1-m")]
    OneMonth,
    #[serde(rename = "today 3-m")]
    ThreeMonths,
}

impl Timeframe {
    /// All buckets in ascending span order
    pub fn all() -> [Self; 4] {
        [Self::OneDay, Self::SevenDays, Self::OneMonth, Self::ThreeMonths]
    }

    /// Provider token for this bucket
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "today 1-d",
            Self::SevenDays => "today 7-d",
            Self::OneMonth => "today 1-m",
            Self::ThreeMonths => "today 3-m",
        }
    }

    /// Bucket covering a target date `days_ago` days in the past
    pub fn from_days_ago(days_ago: i64) -> Self {
        if days_ago <= 1 {
            Self::OneDay
        } else if days_ago <= 7 {
            Self::SevenDays
        } else if days_ago <= 30 {
            Self::OneMonth
        } else {
            Self::ThreeMonths
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for tokens outside the four canonical buckets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown timeframe token: {0}")]
pub struct UnknownTimeframe(pub String);

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| UnknownTimeframe(s.to_string()))
    }
}

/// One sample of an interest-over-time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestPoint {
    pub time: DateTime<Utc>,
    /// `None` marks a missing sample
    pub value: Option<f64>,
}

/// Interest-over-time series for a single keyword
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterestSeries {
    pub keyword: String,
    pub points: Vec<InterestPoint>,
}

impl InterestSeries {
    pub fn new(keyword: impl Into<String>, points: Vec<InterestPoint>) -> Self {
        Self {
            keyword: keyword.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Present (non-missing, finite) sample values in time order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_tokens_round_trip_through_from_str() {
        for tf in Timeframe::all() {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        assert!("today 5-y".parse::<Timeframe>().is_err());
        assert!("".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_serializes_as_token() {
        let json = serde_json::to_string(&Timeframe::OneMonth).unwrap();
        assert_eq!(json, "\"today 1-m\"");
    }

    #[test]
    fn test_timeframe_from_days_ago_boundaries() {
        assert_eq!(Timeframe::from_days_ago(-3), Timeframe::OneDay);
        assert_eq!(Timeframe::from_days_ago(0), Timeframe::OneDay);
        assert_eq!(Timeframe::from_days_ago(1), Timeframe::OneDay);
        assert_eq!(Timeframe::from_days_ago(2), Timeframe::SevenDays);
        assert_eq!(Timeframe::from_days_ago(7), Timeframe::SevenDays);
        assert_eq!(Timeframe::from_days_ago(8), Timeframe::OneMonth);
        assert_eq!(Timeframe::from_days_ago(30), Timeframe::OneMonth);
        assert_eq!(Timeframe::from_days_ago(31), Timeframe::ThreeMonths);
    }

    #[test]
    fn test_trend_entry_clamps_and_matches() {
        let entry = TrendEntry::new("Jakarta", 150, 90, "#FF6B6B");
        assert_eq!(entry.interest, 100);
        assert!(entry.matches("jak"));
        assert!(!entry.matches("bali"));
        assert!(entry.has_inverted_peak());
    }

    #[test]
    fn test_series_values_skip_missing_samples() {
        let t = Utc::now();
        let series = InterestSeries::new(
            "bali",
            vec![
                InterestPoint { time: t, value: Some(10.0) },
                InterestPoint { time: t, value: None },
                InterestPoint { time: t, value: Some(f64::NAN) },
                InterestPoint { time: t, value: Some(30.0) },
            ],
        );
        assert_eq!(series.len(), 4);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![10.0, 30.0]);
    }
}
