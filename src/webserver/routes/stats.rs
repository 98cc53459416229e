use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use crate::webserver::{
    state::AppState,
    utils::{board_error_response, error_response, success_response},
};

/// Create token stats cache routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/token-stats/:address", get(get_stats).post(save_stats))
}

/// GET /api/token-stats/:address
async fn get_stats(State(state): State<Arc<AppState>>, Path(address): Path<String>) -> Response {
    match state.board.get_cached_stats(&address) {
        Ok(Some(cached)) => success_response(cached),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            &format!("No cached stats for {}", address),
        ),
        Err(e) => board_error_response(&e),
    }
}

/// POST /api/token-stats/:address (body is the payload)
async fn save_stats(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, "INVALID_BODY", &rejection.body_text())
        }
    };

    match state.board.save_cached_stats(&address, payload).await {
        Ok(cached) => success_response(cached),
        Err(e) => board_error_response(&e),
    }
}
