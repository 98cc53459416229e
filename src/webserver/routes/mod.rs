use crate::webserver::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod snapshot;
pub mod stats;
pub mod status;
pub mod tokens;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(snapshot::routes())
        .merge(tokens::routes())
        .merge(stats::routes())
}
