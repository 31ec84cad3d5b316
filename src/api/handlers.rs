//! API Handlers
//!
//! HTTP request handlers for each log server endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    HealthResponse, ListFilesResponse, ListLogsRequest, ListLogsResponse, StatsResponse,
};
use crate::service::LogService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: LogService,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: LogService) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(LogService::from_config(config))
    }

    /// The response cache, for the cleanup task.
    pub fn cache(&self) -> SharedCache {
        self.service.cache().clone()
    }
}

/// Handler for GET /logs
///
/// Returns the newest matching lines of one log file. Every request gets an
/// id that tags all log output produced while serving it.
pub async fn list_logs_handler(
    State(state): State<AppState>,
    Query(request): Query<ListLogsRequest>,
) -> Result<Json<ListLogsResponse>> {
    let request_id = Uuid::new_v4();
    let span = info_span!("list_logs", %request_id);

    async move {
        info!("Starting request");
        state.service.list_logs(request).await.map(Json)
    }
    .instrument(span)
    .await
}

/// Handler for GET /logs/files
pub async fn list_files_handler(State(state): State<AppState>) -> Result<Json<ListFilesResponse>> {
    let response = state.service.list_files().await?;
    Ok(Json(response))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.service.cache_stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}
