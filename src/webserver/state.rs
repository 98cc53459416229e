/// Shared application state for the webserver
use crate::config::WebserverConfig;
use crate::service::TokenBoard;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<TokenBoard>,

    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(board: Arc<TokenBoard>, config: WebserverConfig) -> Self {
        Self {
            board,
            config: Arc::new(config),
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
