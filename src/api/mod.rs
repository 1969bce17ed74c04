//! HTTP surface of the trends service
//!
//! # Endpoints
//!
//! ```text
//! GET /trends          ?keyword=&date=YYYY-MM-DD&timeframe=today 1-d
//! GET /trends/health   always 200
//! GET /metrics         Prometheus text format
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use trendboard::api::TrendServer;
//! use trendboard::config::Config;
//!
//! let config = Config::from_env()?;
//! let server = TrendServer::from_config(&config)?;
//! server.start().await?;
//! ```

pub mod routes;
pub mod server;

// Re-export main types
pub use routes::{create_router, ErrorResponse, HealthResponse};
pub use server::{AppState, ServerError, ServerInfo, TrendServer};
