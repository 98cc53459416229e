/// Core data model shared by the stores, the scan pipeline and the request layer
///
/// Everything here serializes with camelCase field names; the three persisted
/// JSON documents (registry, snapshot history, token stats) are built from these types.
use crate::constants::HISTORY_DEPTH;
use crate::errors::BoardError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern is valid"));

// ============================================================================
// ADDRESSES
// ============================================================================

/// Normalized (lowercase) 20-byte hex contract address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

/// Contract address of a tracked token
pub type TokenAddress = Address;

/// Address of a liquidity pool / trading pair on the provider
pub type PairAddress = Address;

impl Address {
    /// Validate and normalize a raw address string
    pub fn parse(raw: &str) -> Result<Self, BoardError> {
        let trimmed = raw.trim();
        if !ADDRESS_PATTERN.is_match(trimmed) {
            return Err(BoardError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw provider string
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw.trim())
    }

    /// `0x1234…abcd` form for log lines
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl TryFrom<String> for Address {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TOKEN REGISTRY
// ============================================================================

/// Tracked tokens plus the pair addresses discovered for each of them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRegistry {
    pub tokens: Vec<TokenAddress>,
    pub pairs: BTreeMap<TokenAddress, BTreeSet<PairAddress>>,
}

impl TokenRegistry {
    pub fn contains(&self, token: &TokenAddress) -> bool {
        self.tokens.contains(token)
    }

    pub fn known_pairs(&self, token: &TokenAddress) -> Option<&BTreeSet<PairAddress>> {
        self.pairs.get(token)
    }

    /// Append a token if it is not tracked yet. Returns true when the registry changed.
    pub fn insert_token(&mut self, token: &TokenAddress) -> bool {
        if self.contains(token) {
            return false;
        }
        self.tokens.push(token.clone());
        true
    }

    /// Union new pair addresses into the token's set. Returns true when the set grew.
    pub fn union_pairs<'a, I>(&mut self, token: &TokenAddress, new_pairs: I) -> bool
    where
        I: IntoIterator<Item = &'a PairAddress>,
    {
        let mut new_pairs = new_pairs.into_iter().peekable();
        if new_pairs.peek().is_none() {
            return false;
        }

        let set = self.pairs.entry(token.clone()).or_default();
        let before = set.len();
        set.extend(new_pairs.cloned());
        set.len() != before
    }
}

// ============================================================================
// ROWS AND BANNERS
// ============================================================================

/// Per-token computed view, rebuilt on every scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRow {
    pub base_address: TokenAddress,
    pub name: String,
    pub symbol: String,
    pub change_5m: Option<f64>,
    pub change_1h: Option<f64>,
    pub change_6h: Option<f64>,
    pub change_24h: Option<f64>,
    /// Market cap, falling back to FDV when the provider has no market cap
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    pub volume_24h: f64,
    pub url: String,
    /// Market cap exactly as the provider reported it, without the FDV fallback
    #[serde(skip)]
    pub reported_market_cap: Option<f64>,
}

/// Scan-level summary across all built rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Filled in client-side; always null here
    pub holders: Option<u64>,
    pub market_cap: Option<f64>,
    pub volume_24h: f64,
    pub change_24h: Option<f64>,
    pub link: String,
}

/// Summary of the designated home token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerSpecial {
    pub address: TokenAddress,
    pub name: String,
    pub symbol: String,
    pub holders: Option<u64>,
    pub market_cap: Option<f64>,
    pub volume_24h: f64,
    pub change_24h: Option<f64>,
    pub link: String,
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub chain: String,
    pub banner: Banner,
    pub banner_special: Option<BannerSpecial>,
    pub top_gainers: Vec<TokenRow>,
    pub top_volume: Vec<TokenRow>,
    pub tokens_tracked: usize,
}

/// Latest snapshot plus a bounded newest-first history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotHistory {
    pub latest: Option<Snapshot>,
    pub history: Vec<Snapshot>,
}

impl SnapshotHistory {
    /// Make `snapshot` the latest and prepend it, dropping the oldest beyond the depth
    pub fn record(&mut self, snapshot: Snapshot) {
        self.history.insert(0, snapshot.clone());
        self.history.truncate(HISTORY_DEPTH);
        self.latest = Some(snapshot);
    }
}

// ============================================================================
// TOKEN STATS CACHE
// ============================================================================

/// Opaque deep-scan payload stored verbatim per token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedStats {
    pub timestamp: DateTime<Utc>,
    pub payload: serde_json::Value,
}

pub type TokenStatsCache = BTreeMap<TokenAddress, CachedStats>;

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: char) -> Address {
        Address::parse(&format!("0x{}", byte.to_string().repeat(40))).unwrap()
    }

    fn empty_snapshot(minute: u32) -> Snapshot {
        Snapshot {
            timestamp: DateTime::parse_from_rfc3339(&format!("2026-01-01T00:{:02}:00Z", minute))
                .unwrap()
                .with_timezone(&Utc),
            chain: "ethereum".to_string(),
            banner: Banner {
                holders: None,
                market_cap: None,
                volume_24h: 0.0,
                change_24h: None,
                link: String::new(),
            },
            banner_special: None,
            top_gainers: Vec::new(),
            top_volume: Vec::new(),
            tokens_tracked: 0,
        }
    }

    #[test]
    fn test_address_is_normalized_to_lowercase() {
        let a = Address::parse("0xABCDEFabcdef0123456789ABCDEF0123456789ab").unwrap();
        assert_eq!(a.as_str(), "0xabcdefabcdef0123456789abcdef0123456789ab");
        assert!(a.matches("0xAbCdEfAbCdEf0123456789AbCdEf0123456789AB"));
    }

    #[test]
    fn test_address_rejects_malformed_input() {
        assert!(matches!(Address::parse("0x1234"), Err(BoardError::InvalidAddress(_))));
        assert!(Address::parse("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2").is_err());
        assert!(Address::parse("0xzz2aaa39b223fe8d0a0e5c4f27ead9083c756cc2").is_err());
        assert!(Address::parse("").is_err());
    }

    #[test]
    fn test_address_deserialization_validates() {
        let ok: Address = serde_json::from_str("\"0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA\"").unwrap();
        assert_eq!(ok, addr('a'));
        assert!(serde_json::from_str::<Address>("\"nope\"").is_err());
    }

    #[test]
    fn test_insert_token_is_idempotent() {
        let mut registry = TokenRegistry::default();
        assert!(registry.insert_token(&addr('a')));
        assert!(!registry.insert_token(&addr('a')));
        assert_eq!(registry.tokens, vec![addr('a')]);
    }

    #[test]
    fn test_union_pairs_deduplicates() {
        let mut registry = TokenRegistry::default();
        let token = addr('a');
        let pairs = vec![addr('b'), addr('c'), addr('b')];

        assert!(registry.union_pairs(&token, &pairs));
        assert!(!registry.union_pairs(&token, &pairs));
        assert_eq!(registry.known_pairs(&token).unwrap().len(), 2);
    }

    #[test]
    fn test_union_pairs_with_nothing_leaves_registry_untouched() {
        let mut registry = TokenRegistry::default();
        assert!(!registry.union_pairs(&addr('a'), &Vec::new()));
        assert!(registry.pairs.is_empty());
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let mut history = SnapshotHistory::default();
        for minute in 0..(HISTORY_DEPTH as u32 + 3) {
            history.record(empty_snapshot(minute));
            assert!(history.history.len() <= HISTORY_DEPTH);
        }

        let newest = empty_snapshot(HISTORY_DEPTH as u32 + 2);
        assert_eq!(history.latest.as_ref(), Some(&newest));
        assert_eq!(history.history[0], newest);
        assert_eq!(history.history.len(), HISTORY_DEPTH);
        assert!(history.history[0].timestamp > history.history[HISTORY_DEPTH - 1].timestamp);
    }

    #[test]
    fn test_row_serializes_camel_case() {
        let row = TokenRow {
            base_address: addr('a'),
            name: "Token".into(),
            symbol: "TKN".into(),
            change_5m: Some(1.0),
            change_1h: None,
            change_6h: None,
            change_24h: Some(-2.5),
            market_cap: None,
            fdv: Some(10.0),
            volume_24h: 0.0,
            url: "https://dexscreener.com".into(),
            reported_market_cap: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["baseAddress"], "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(json["change5m"], 1.0);
        assert!(json["change1h"].is_null());
        assert_eq!(json["volume24h"], 0.0);
        assert!(json.get("reportedMarketCap").is_none());
    }
}
