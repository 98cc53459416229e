/// DexScreener API client
///
/// API Documentation: https://docs.dexscreener.com/api/reference
///
/// Endpoints used:
/// 1. /tokens/v1/{chainId}/{tokenAddress} - token overview (array of pairs, first is the primary)
/// 2. /latest/dex/search?q={query} - pair search, used to discover every pool of a token
pub mod types;

pub use self::types::{numeric, DexScreenerPairRaw, PairRecord, PairsResponse, TokenInfo, WindowValues};

use super::client::RateLimiter;
use super::MarketDataProvider;
use crate::config::ProviderConfig;
use crate::constants::CHAIN_ID;
use crate::errors::{BoardError, BoardResult};
use crate::logger::{self, LogTag};
use crate::types::TokenAddress;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Requests per minute allowed by the public API
pub const RATE_LIMIT_PER_MINUTE: usize = 300;

pub struct DexScreenerClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    limiter: RateLimiter,
}

impl DexScreenerClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, String> {
        if config.timeout_secs == 0 {
            return Err("Timeout must be greater than zero".to_string());
        }

        let client = Client::builder()
            .user_agent(concat!("tokenboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            limiter: RateLimiter::new(config.max_concurrent_requests, RATE_LIMIT_PER_MINUTE),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, endpoint: &str, builder: reqwest::RequestBuilder) -> BoardResult<T>
    where
        T: DeserializeOwned,
    {
        let guard = self
            .limiter
            .acquire()
            .await
            .map_err(|e| BoardError::Upstream(format!("Rate limiter error: {}", e)))?;

        let start = Instant::now();
        let response = builder.timeout(self.timeout).send().await;
        drop(guard);

        let response = response.map_err(|e| {
            logger::debug(LogTag::Api, &format!("{} request failed: {}", endpoint, e));
            BoardError::Upstream(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        logger::debug(
            LogTag::Api,
            &format!("{} -> {} in {}ms", endpoint, status, start.elapsed().as_millis()),
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("DexScreener {} returned HTTP {}", endpoint, status);
            return Err(BoardError::Upstream(format!("DexScreener API error {}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BoardError::Upstream(format!("Failed to parse response: {}", e)))
    }

    /// Token overview: the first (primary) pair the provider lists for the token
    pub async fn token_overview(&self, address: &TokenAddress) -> BoardResult<PairRecord> {
        let url = format!("{}/tokens/v1/{}/{}", self.base_url, CHAIN_ID, address);
        let pairs: Vec<DexScreenerPairRaw> = self.get_json("tokens", self.client.get(&url)).await?;

        pairs
            .first()
            .map(DexScreenerPairRaw::to_record)
            .ok_or_else(|| BoardError::NotFound(format!("No pairs listed for {}", address)))
    }

    /// Free-text pair search; a null `pairs` field is treated as no results
    pub async fn search(&self, query: &str) -> BoardResult<Vec<PairRecord>> {
        let url = format!("{}/latest/dex/search", self.base_url);
        let builder = self.client.get(&url).query(&[("q", query)]);
        let response: PairsResponse = self.get_json("search", builder).await?;

        let records: Vec<PairRecord> = response
            .pairs
            .unwrap_or_default()
            .iter()
            .map(DexScreenerPairRaw::to_record)
            .collect();

        logger::debug(
            LogTag::Api,
            &format!("Search '{}' returned {} pairs", query, records.len()),
        );
        Ok(records)
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerClient {
    async fn fetch_token_overview(&self, address: &TokenAddress) -> BoardResult<PairRecord> {
        self.token_overview(address).await
    }

    async fn search_pairs(&self, query: &str) -> BoardResult<Vec<PairRecord>> {
        self.search(query).await
    }
}


#[cfg(all(test, feature = "web"))]
mod http_tests {
    use super::*;
    use axum::extract::Path;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const TOKEN: &str = "0x1111111111111111111111111111111111111111";
    const EMPTY_TOKEN: &str = "0x2222222222222222222222222222222222222222";

    async fn overview(Path((_chain, address)): Path<(String, String)>) -> Json<Value> {
        if address == EMPTY_TOKEN {
            return Json(json!([]));
        }
        Json(json!([{
            "pairAddress": "0x3333333333333333333333333333333333333333",
            "baseToken": {"address": address, "name": "Mock", "symbol": "MOCK"},
            "priceChange": {"h24": 12.5},
            "volume": {"h24": "1000"},
            "fdv": 5000
        }]))
    }

    async fn search() -> Json<Value> {
        Json(json!({"schemaVersion": "1.0.0", "pairs": null}))
    }

    async fn spawn_mock() -> String {
        let app = Router::new()
            .route("/tokens/v1/:chain/:address", get(overview))
            .route("/latest/dex/search", get(search));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> DexScreenerClient {
        DexScreenerClient::new(&ProviderConfig { base_url, ..ProviderConfig::default() }).unwrap()
    }

    #[tokio::test]
    async fn test_overview_uses_first_record() {
        let client = client_for(spawn_mock().await);
        let record = client.token_overview(&TokenAddress::parse(TOKEN).unwrap()).await.unwrap();

        assert_eq!(record.base_token_symbol.as_deref(), Some("MOCK"));
        assert_eq!(record.price_change_h24, Some(12.5));
        assert_eq!(record.volume_h24, Some(1000.0));
        assert_eq!(record.market_cap, None);
    }

    #[tokio::test]
    async fn test_empty_overview_is_not_found() {
        let client = client_for(spawn_mock().await);
        let err = client
            .token_overview(&TokenAddress::parse(EMPTY_TOKEN).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_search_with_null_pairs_is_empty() {
        let client = client_for(spawn_mock().await);
        assert!(client.search(TOKEN).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_is_upstream_error() {
        let base = spawn_mock().await;
        let client = client_for(format!("{}/nowhere", base));
        let err = client.search(TOKEN).await.unwrap_err();
        assert!(matches!(err, BoardError::Upstream(_)));
    }
}
