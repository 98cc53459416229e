/// Global constants used across TokenBoard
///
/// This module contains system-wide constants that are not configurable
/// and are used across multiple modules.

// ============================================================================
// CHAIN CONSTANTS
// ============================================================================

/// The single chain every tracked token lives on
pub const CHAIN_ID: &str = "ethereum";

/// Default designated "home" token summarized by the special banner (WETH)
pub const DEFAULT_HOME_TOKEN: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

// ============================================================================
// SNAPSHOT CONSTANTS
// ============================================================================

/// Maximum rows in each ranking list
pub const RANKING_SIZE: usize = 15;

/// Number of snapshots kept in the rolling history
pub const HISTORY_DEPTH: usize = 5;

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Public site used for display links
pub const DEXSCREENER_SITE_URL: &str = "https://dexscreener.com";

/// Canonical page for a token on the data provider's site
pub fn token_page_url(address: &str) -> String {
    format!("{}/{}/{}", DEXSCREENER_SITE_URL, CHAIN_ID, address)
}

/// Chain overview page, used as the general banner link
pub fn chain_page_url() -> String {
    format!("{}/{}", DEXSCREENER_SITE_URL, CHAIN_ID)
}
