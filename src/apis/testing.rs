/// Scripted in-memory provider for exercising the scan pipeline without network access
use super::{MarketDataProvider, PairRecord};
use crate::errors::{BoardError, BoardResult};
use crate::types::TokenAddress;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct ScriptedProvider {
    overviews: Mutex<HashMap<String, BoardResult<PairRecord>>>,
    searches: Mutex<HashMap<String, BoardResult<Vec<PairRecord>>>>,
    delays: Mutex<HashMap<String, Duration>>,
    overview_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overview(self, address: &str, result: BoardResult<PairRecord>) -> Self {
        self.overviews.lock().insert(address.to_ascii_lowercase(), result);
        self
    }

    pub fn with_search(self, query: &str, result: BoardResult<Vec<PairRecord>>) -> Self {
        self.searches.lock().insert(query.to_ascii_lowercase(), result);
        self
    }

    /// Delay every call concerning `address` (overview and search)
    pub fn with_delay(self, address: &str, delay: Duration) -> Self {
        self.delays.lock().insert(address.to_ascii_lowercase(), delay);
        self
    }

    pub fn overview_calls(&self) -> usize {
        self.overview_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    async fn pause_for(&self, key: &str) {
        let delay = self.delays.lock().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    async fn fetch_token_overview(&self, address: &TokenAddress) -> BoardResult<PairRecord> {
        self.overview_calls.fetch_add(1, Ordering::SeqCst);
        self.pause_for(address.as_str()).await;
        self.overviews
            .lock()
            .get(address.as_str())
            .cloned()
            .unwrap_or_else(|| Err(BoardError::NotFound(address.to_string())))
    }

    async fn search_pairs(&self, query: &str) -> BoardResult<Vec<PairRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let key = query.to_ascii_lowercase();
        self.pause_for(&key).await;
        self.searches.lock().get(&key).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// 20-byte address made of one repeated hex digit
pub fn address(digit: char) -> String {
    format!("0x{}", digit.to_string().repeat(40))
}

pub fn token(digit: char) -> TokenAddress {
    TokenAddress::parse(&address(digit)).unwrap()
}

/// Pair record whose base token is `base`
pub fn pair(base: &str, pair_address: &str, volume_h24: Option<f64>) -> PairRecord {
    PairRecord {
        pair_address: Some(pair_address.to_string()),
        base_token_address: Some(base.to_string()),
        volume_h24,
        ..PairRecord::default()
    }
}

/// Overview record with display fields and a 24h change
pub fn overview(base: &str, symbol: &str, change_h24: Option<f64>, volume_h24: Option<f64>) -> PairRecord {
    PairRecord {
        pair_address: Some(address('f')),
        base_token_address: Some(base.to_string()),
        base_token_name: Some(format!("{} Token", symbol)),
        base_token_symbol: Some(symbol.to_string()),
        price_change_h24: change_h24,
        volume_h24,
        url: Some(format!("https://dexscreener.com/ethereum/{}", base)),
        ..PairRecord::default()
    }
}
