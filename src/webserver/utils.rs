/// Response helpers shared by the route handlers
use crate::errors::BoardError;
use crate::logger::{self, LogTag};
use crate::webserver::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// 200 with a JSON body
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = ErrorResponse {
        error: message.to_string(),
        code: code.to_string(),
    };
    (status, Json(body)).into_response()
}

/// HTTP status and error code for each failure kind
pub fn status_for(err: &BoardError) -> (StatusCode, &'static str) {
    match err {
        BoardError::InvalidAddress(_) => (StatusCode::BAD_REQUEST, "INVALID_ADDRESS"),
        BoardError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
        BoardError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        BoardError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        BoardError::Persist(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PERSIST_ERROR"),
    }
}

/// Map a [`BoardError`] onto an error response. Server-side failures are logged.
pub fn board_error_response(err: &BoardError) -> Response {
    let (status, code) = status_for(err);
    if status.is_server_error() {
        logger::error(LogTag::Webserver, &format!("{}: {}", code, err));
    } else {
        logger::debug(LogTag::Webserver, &format!("{}: {}", code, err));
    }
    error_response(status, code, &err.to_string())
}
