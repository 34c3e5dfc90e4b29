//! edf-processor library interface
//!
//! Scans a directory of EDF (European Data Format) recordings, decodes
//! their header metadata, and serves the results over HTTP REST.

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use edf_common::config::CorsConfig;

use crate::services::{IngestService, RecordingQuery};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Directory scan and snapshot replacement
    pub ingest: Arc<IngestService>,
    /// Read-only views over the cached snapshot
    pub query: Arc<RecordingQuery>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(ingest: Arc<IngestService>, query: Arc<RecordingQuery>) -> AppState {
        AppState {
            ingest,
            query,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .merge(api::recording_routes().layer(cors_layer(cors)))
        .merge(api::health_routes())
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mut origins = Vec::new();
    for origin in &cors.allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!("Ignoring invalid CORS origin: {}", origin),
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials)
}
