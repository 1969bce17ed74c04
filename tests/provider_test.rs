//! Integration tests for HttpTrendProvider using wiremock
//!
//! These tests validate the provider client's behavior with mock servers.

use std::time::Duration;
use trendboard::models::Timeframe;
use trendboard::provider::{
    HttpProviderConfig, HttpTrendProvider, InterestQuery, ProviderError, TrendProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> HttpTrendProvider {
    HttpTrendProvider::with_base_url(&server.uri()).unwrap()
}

/// Trending list is returned in provider order
#[tokio::test]
async fn test_trending_searches_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .and(query_param("pn", "indonesia"))
        .and(query_param("hl", "id-ID"))
        .and(query_param("tz", "420"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["Timnas", "Gempa", "Pemilu"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let keywords = provider_for(&mock_server).trending_searches().await.unwrap();
    assert_eq!(keywords, vec!["Timnas", "Gempa", "Pemilu"]);
}

/// Interest query carries keyword, timeframe, and geography
#[tokio::test]
async fn test_interest_over_time_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/interest"))
        .and(query_param("keyword", "Timnas"))
        .and(query_param("timeframe", "today 7-d"))
        .and(query_param("geo", "ID"))
        .and(query_param("cat", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timeline": [
                {"time": "2024-01-15T00:00:00Z", "values": {"Timnas": 35}},
                {"time": "2024-01-16T00:00:00Z", "values": {"Timnas": null}},
                {"time": "2024-01-17T00:00:00Z", "values": {"Timnas": 81}}
            ]
        })))
        .mount(&mock_server)
        .await;

    let query = InterestQuery::new("Timnas", Timeframe::SevenDays, "ID");
    let series = provider_for(&mock_server)
        .interest_over_time(&query)
        .await
        .unwrap();

    assert_eq!(series.keyword, "Timnas");
    assert_eq!(series.len(), 3);
    assert_eq!(series.values().collect::<Vec<_>>(), vec![35.0, 81.0]);
}

/// Server errors are reported once, without retry
#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = provider_for(&mock_server).trending_searches().await;
    assert!(matches!(result, Err(ProviderError::ServerError(503))));
}

/// Malformed body maps to a decode error
#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/interest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&mock_server)
        .await;

    let query = InterestQuery::new("x", Timeframe::OneDay, "ID");
    let result = provider_for(&mock_server).interest_over_time(&query).await;
    assert!(matches!(result, Err(ProviderError::Decode(_))));
}

/// Slow provider maps to a timeout error
#[tokio::test]
async fn test_timeout_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["late"]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let provider = HttpTrendProvider::new(HttpProviderConfig {
        base_url: mock_server.uri(),
        timeout: Duration::from_millis(100),
        ..HttpProviderConfig::default()
    })
    .unwrap();

    let result = provider.trending_searches().await;
    assert!(
        matches!(result, Err(ProviderError::Timeout)),
        "Expected timeout, got {result:?}"
    );
}

/// Nothing listening on the port
#[tokio::test]
async fn test_connection_refused() {
    let provider = HttpTrendProvider::new(HttpProviderConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: Duration::from_secs(1),
        ..HttpProviderConfig::default()
    })
    .unwrap();

    let result = provider.trending_searches().await;
    assert!(result.is_err(), "Should fail on connection refused");
}

/// Custom region and language reach the provider
#[tokio::test]
async fn test_region_and_language_are_configurable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending"))
        .and(query_param("pn", "japan"))
        .and(query_param("hl", "ja-JP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = HttpTrendProvider::new(HttpProviderConfig {
        base_url: mock_server.uri(),
        region: "japan".to_string(),
        language: "ja-JP".to_string(),
        ..HttpProviderConfig::default()
    })
    .unwrap();

    assert!(provider.trending_searches().await.unwrap().is_empty());
}
