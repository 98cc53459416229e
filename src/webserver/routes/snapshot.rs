use axum::{extract::State, response::Response, routing::{get, post}, Router};
use std::sync::Arc;

use crate::{
    logger::{self, LogTag},
    webserver::{
        models::{EmptySnapshotResponse, RefreshResponse},
        state::AppState,
        utils::{board_error_response, success_response},
    },
};

/// Create snapshot routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/snapshot", get(get_snapshot))
        .route("/refresh", post(refresh))
}

/// GET /api/snapshot
///
/// Returns the latest snapshot. With `scan_on_empty` set, a missing snapshot
/// triggers a scan first.
async fn get_snapshot(State(state): State<Arc<AppState>>) -> Response {
    if let Some(snapshot) = state.board.latest_snapshot() {
        return success_response(snapshot);
    }

    if !state.config.scan_on_empty {
        return success_response(EmptySnapshotResponse { snapshot: None });
    }

    logger::info(LogTag::Webserver, "No snapshot yet, scanning on request");
    match state.board.trigger_scan().await {
        Ok(outcome) => match outcome.into_snapshot() {
            Some(snapshot) => success_response(snapshot),
            None => success_response(EmptySnapshotResponse { snapshot: None }),
        },
        Err(e) => board_error_response(&e),
    }
}

/// POST /api/refresh
async fn refresh(State(state): State<Arc<AppState>>) -> Response {
    match state.board.trigger_scan().await {
        Ok(outcome) => success_response(RefreshResponse {
            skipped: outcome.is_skipped(),
            snapshot: outcome.into_snapshot(),
        }),
        Err(e) => board_error_response(&e),
    }
}
