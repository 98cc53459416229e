// Configuration schema for every TokenBoard subsystem

use crate::config_struct;
use crate::constants::{DEFAULT_HOME_TOKEN, DEXSCREENER_BASE_URL};

// ============================================================================
// PROVIDER
// ============================================================================

config_struct! {
    /// Market-data provider (DexScreener) client settings
    pub struct ProviderConfig {
        /// API base URL, without trailing slash
        base_url: String = DEXSCREENER_BASE_URL.to_string(),

        /// Per-request timeout
        timeout_secs: u64 = 10,

        /// Upper bound on in-flight provider requests
        max_concurrent_requests: usize = 4,
    }
}

// ============================================================================
// SCANNER
// ============================================================================

config_struct! {
    /// Snapshot building and scheduling
    pub struct ScannerConfig {
        /// Pause between tokens inside one scan
        token_delay_ms: u64 = 350,

        /// A token whose processing exceeds this is skipped for the scan
        token_timeout_secs: u64 = 30,

        /// Background scan period; 0 disables the background loop
        scan_interval_secs: u64 = 300,

        /// Token summarized by the special banner
        home_token: String = DEFAULT_HOME_TOKEN.to_string(),

        /// Display link of the general banner; empty means the chain page
        banner_link: String = String::new(),
    }
}

// ============================================================================
// WEBSERVER
// ============================================================================

config_struct! {
    /// HTTP request layer
    pub struct WebserverConfig {
        enabled: bool = true,

        /// IP to bind: 127.0.0.1 = localhost only, 0.0.0.0 = all interfaces
        host: String = "127.0.0.1".to_string(),

        port: u16 = 8080,

        /// Run a scan when the latest snapshot is requested before any exists
        scan_on_empty: bool = false,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        provider: ProviderConfig = ProviderConfig::default(),
        scanner: ScannerConfig = ScannerConfig::default(),
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}
