/// API response type definitions

use crate::service::TrackedToken;
use crate::types::Snapshot;
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Simple health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub scanning: bool,
}

/// GET /api/snapshot when no snapshot exists yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptySnapshotResponse {
    pub snapshot: Option<Snapshot>,
}

/// POST /api/refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// True when a scan was already running and no new one was started
    pub skipped: bool,
    pub snapshot: Option<Snapshot>,
}

/// GET /api/tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenListResponse {
    pub tokens: Vec<TrackedToken>,
    pub count: usize,
}
