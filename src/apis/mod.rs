/// Market-data provider access
///
/// The scan pipeline only talks to [`MarketDataProvider`]; the DexScreener
/// client is the production implementation.
pub mod client;
pub mod dexscreener;
#[cfg(test)]
pub mod testing;

pub use client::{RateLimitGuard, RateLimiter};
pub use dexscreener::{DexScreenerClient, PairRecord};

use crate::errors::BoardResult;
use crate::types::TokenAddress;
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Overview record for one token.
    /// `NotFound` when the provider has nothing, `Upstream` on transport/HTTP failure.
    async fn fetch_token_overview(&self, address: &TokenAddress) -> BoardResult<PairRecord>;

    /// Free-text pair search. Results are not guaranteed to involve the queried token.
    async fn search_pairs(&self, query: &str) -> BoardResult<Vec<PairRecord>>;
}
