//! HTTP/JSON client for the trend-data provider
//!
//! This module talks to a provider gateway exposing two endpoints:
//! - `GET {base}/trending` returning a JSON array of keywords
//! - `GET {base}/interest` returning a `timeline` of samples keyed by keyword
//!
//! Requests are never retried. A failed call is reported once and the
//! pipeline decides how to degrade.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    Client, Response,
};
use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use super::{InterestQuery, ProviderError, ProviderResult, TrendProvider};
use crate::models::{InterestPoint, InterestSeries};

/// Settings for [`HttpTrendProvider`]
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Provider gateway base URL
    pub base_url: String,

    /// Region passed to the trending-searches call
    pub region: String,

    /// Host language (e.g. `id-ID`)
    pub language: String,

    /// Timezone offset in minutes
    pub tz_offset_minutes: i32,

    /// Provider category filter, 0 for all
    pub category: u32,

    /// Provider property filter, empty for web search
    pub property: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8090"),
            region: String::from("indonesia"),
            language: String::from("id-ID"),
            tz_offset_minutes: 420,
            category: 0,
            property: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Trend provider reached over HTTP
pub struct HttpTrendProvider {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Parsed gateway base URL
    base_url: Url,

    config: HttpProviderConfig,
}

impl HttpTrendProvider {
    /// Create a provider client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InvalidUrl` if the base URL does not parse and
    /// `ProviderError::Http` if the HTTP client cannot be created
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .default_headers(Self::build_headers(&config.language))
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Create a provider pointing at `base_url` with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self, ProviderError> {
        Self::new(HttpProviderConfig {
            base_url: base_url.to_string(),
            ..HttpProviderConfig::default()
        })
    }

    fn build_headers(language: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("trendboard/", env!("CARGO_PKG_VERSION"))),
        );
        if let Ok(value) = HeaderValue::from_str(language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        headers
    }

    fn endpoint(&self, path: &str) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> ProviderResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let body = Self::read_success_body(response).await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn read_success_body(response: Response) -> ProviderResult<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::ServerError(status.as_u16()));
        }
        response.text().await.map_err(Self::map_transport_error)
    }

    fn map_transport_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Http(e)
        }
    }

    fn common_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("hl", self.config.language.clone()),
            ("tz", self.config.tz_offset_minutes.to_string()),
        ]
    }
}

/// Wire shape of the interest endpoint
#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(default)]
    timeline: Vec<TimelineSample>,
}

#[derive(Debug, Deserialize)]
struct TimelineSample {
    time: DateTime<Utc>,
    #[serde(default)]
    values: HashMap<String, Option<f64>>,
}

impl TimelineResponse {
    fn into_series(self, keyword: &str) -> InterestSeries {
        let points = self
            .timeline
            .into_iter()
            .map(|sample| InterestPoint {
                time: sample.time,
                value: sample.values.get(keyword).copied().flatten(),
            })
            .collect();
        InterestSeries::new(keyword, points)
    }
}

#[async_trait]
impl TrendProvider for HttpTrendProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn trending_searches(&self) -> ProviderResult<Vec<String>> {
        let url = self.endpoint("trending")?;
        let mut params = self.common_params();
        params.push(("pn", self.config.region.clone()));

        tracing::debug!(url = %url, region = %self.config.region, "Fetching trending searches");

        self.get_json(url, &params).await
    }

    async fn interest_over_time(&self, query: &InterestQuery) -> ProviderResult<InterestSeries> {
        let url = self.endpoint("interest")?;
        let mut params = self.common_params();
        params.extend([
            ("keyword", query.keyword.clone()),
            ("timeframe", query.timeframe.as_str().to_string()),
            ("geo", query.geo.clone()),
            ("cat", self.config.category.to_string()),
            ("gprop", self.config.property.clone()),
        ]);

        tracing::debug!(
            keyword = %query.keyword,
            timeframe = %query.timeframe,
            geo = %query.geo,
            "Fetching interest over time"
        );

        let response: TimelineResponse = self.get_json(url, &params).await?;
        Ok(response.into_series(&query.keyword))
    }
}
