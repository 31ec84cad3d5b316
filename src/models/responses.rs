//! Response DTOs for the log server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::scanner::LogPage;

/// Response body for GET /logs
///
/// `next_offset` is `offset` plus the number of lines actually returned, so
/// passing it back as the next request's offset never skips or repeats lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsResponse {
    /// Matching lines, newest first
    pub logs: Vec<String>,
    pub offset: u64,
    pub limit: usize,
    pub has_more: bool,
    pub next_offset: u64,
}

impl ListLogsResponse {
    /// Builds the response for one scanned page.
    pub fn from_page(page: LogPage, offset: u64, limit: usize) -> Self {
        let next_offset = offset + page.lines.len() as u64;
        Self {
            logs: page.lines,
            offset,
            limit,
            has_more: page.has_more,
            next_offset,
        }
    }
}

/// Response body for GET /logs/files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status, "UP" while serving
    pub status: String,
    /// Crate version
    pub version: String,
    /// Current timestamp in RFC 3339 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
