//! Request-facing query processing: filter, sort, wrap

use serde::{Deserialize, Serialize};

use crate::models::{Timeframe, TrendEntry};

/// Query parameters of `GET /trends`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendQuery {
    /// Case-insensitive substring filter on the keyword
    pub keyword: Option<String>,

    /// Target date, `YYYY-MM-DD`
    pub date: Option<String>,

    /// Explicit timeframe token
    pub timeframe: Option<String>,
}

impl TrendQuery {
    /// Build from decoded query pairs; the first value of a repeated key wins
    /// and unknown keys are ignored
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "keyword" => &mut query.keyword,
                "date" => &mut query.date,
                "timeframe" => &mut query.timeframe,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = Some(timeframe.into());
        self
    }
}

/// Successful `GET /trends` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsReport {
    pub success: bool,
    pub data: Vec<TrendEntry>,
    pub timeframe: Timeframe,
    pub total: usize,
}

impl TrendsReport {
    pub fn new(data: Vec<TrendEntry>, timeframe: Timeframe) -> Self {
        Self {
            success: true,
            total: data.len(),
            data,
            timeframe,
        }
    }
}

/// Keep entries matching `filter` and order them by interest, highest first
///
/// An absent or empty filter keeps everything. The sort is stable, so ties
/// keep their input order.
pub fn filter_and_sort(entries: Vec<TrendEntry>, filter: Option<&str>) -> Vec<TrendEntry> {
    let needle = filter.map(str::to_lowercase).filter(|f| !f.is_empty());

    let mut retained: Vec<TrendEntry> = match needle {
        Some(needle) => entries.into_iter().filter(|e| e.matches(&needle)).collect(),
        None => entries,
    };

    retained.sort_by(|a, b| b.interest.cmp(&a.interest));
    retained
}

/// Filter, sort, and wrap into the response body
pub fn process(entries: Vec<TrendEntry>, filter: Option<&str>, timeframe: Timeframe) -> TrendsReport {
    TrendsReport::new(filter_and_sort(entries, filter), timeframe)
}
