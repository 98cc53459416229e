use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::webserver::{
    models::{AddTokenRequest, TokenListResponse},
    state::AppState,
    utils::{board_error_response, error_response, success_response},
};

/// Create token registry routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tokens", get(list_tokens).post(add_token))
}

/// GET /api/tokens
async fn list_tokens(State(state): State<Arc<AppState>>) -> Response {
    let tokens = state.board.list_tokens();
    success_response(TokenListResponse {
        count: tokens.len(),
        tokens,
    })
}

/// POST /api/tokens
async fn add_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddTokenRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, "INVALID_BODY", &rejection.body_text())
        }
    };

    match state.board.add_token(&request.address).await {
        Ok(added) => success_response(added),
        Err(e) => board_error_response(&e),
    }
}
