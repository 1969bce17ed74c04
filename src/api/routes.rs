//! REST API handlers for the trends service
//!
//! This module defines the API routes and handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::PipelineMode;
use crate::error::TrendErrorTrait;
use crate::metrics;
use crate::models::TrendEntry;
use crate::trends::TrendQuery;

use super::server::AppState;

// ============================================================================
// API Response Types
// ============================================================================

/// Failure body of `GET /trends`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub data: Vec<TrendEntry>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            data: Vec::new(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn for_mode(mode: PipelineMode) -> Self {
        let message = match mode {
            PipelineMode::Live => "Google Trends API is running",
            PipelineMode::Mock => "Google Trends API is running (Mock Data)",
        };

        Self {
            success: true,
            message: message.to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/trends", get(get_trends))
        .route("/trends/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Ranked trending keywords
async fn get_trends(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let started = Instant::now();

    let query = match pairs {
        Ok(Query(pairs)) => TrendQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable query string, using defaults");
            TrendQuery::default()
        }
    };

    let (status, response) = match state.pipeline.clone().run_guarded(query).await {
        Ok(report) => (StatusCode::OK, Json(report).into_response()),
        Err(e) => {
            tracing::error!(
                category = e.category().as_str(),
                recoverable = e.is_recoverable(),
                error = %e,
                "Trend pipeline failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())).into_response(),
            )
        }
    };

    metrics::record_api_request("/trends", status.as_u16(), started.elapsed().as_secs_f64());
    (status, response).into_response()
}

/// Liveness, independent of pipeline health
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let response = HealthResponse::for_mode(state.mode);
    metrics::record_api_request("/trends/health", 200, started.elapsed().as_secs_f64());
    Json(response)
}

/// Prometheus text exposition
async fn get_metrics() -> Response {
    match metrics::encode_metrics() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// ============================================================================
// Tests
// ============================================================================
