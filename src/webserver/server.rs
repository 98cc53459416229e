/// Axum webserver implementation
///
/// Server lifecycle: bind, serve, and graceful termination on the shared
/// shutdown notifier.
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::{
    config::WebserverConfig,
    logger::{self, LogTag},
    service::TokenBoard,
    webserver::{routes, state::AppState},
};

/// Start the webserver
///
/// Blocks until `shutdown` is notified
pub async fn start_server(
    board: Arc<TokenBoard>,
    config: WebserverConfig,
    shutdown: Arc<Notify>,
) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", config.host, config.port, e))?;

    let state = Arc::new(AppState::new(board, config));
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => format!(
            "Failed to bind to {}: Address already in use\n\
             \n\
             Another TokenBoard instance may be running, or pick a different\n\
             port with [webserver] port = ... in config.toml.",
            addr
        ),
        std::io::ErrorKind::PermissionDenied => format!(
            "Failed to bind to {}: Permission denied\n\
             \n\
             Port {} requires elevated privileges on this system.\n\
             Consider using a port above 1024.",
            addr,
            addr.port()
        ),
        _ => format!("Failed to bind to {}: {}", addr, e),
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("API listening on http://{}/api", addr),
    );

    let shutdown_signal = async move {
        shutdown.notified().await;
        logger::debug(LogTag::Webserver, "Received shutdown signal, stopping webserver...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "Webserver stopped");
    Ok(())
}

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
}
