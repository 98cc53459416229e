/// Token stats cache: opaque deep-scan payloads stored verbatim per token
use super::JsonStore;
use crate::errors::{BoardError, BoardResult};
use crate::logger::{self, LogTag};
use crate::types::{CachedStats, TokenAddress, TokenStatsCache};
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct StatsCacheStore {
    store: JsonStore<TokenStatsCache>,
    write_lock: Mutex<()>,
}

impl StatsCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path, LogTag::Stats),
            write_lock: Mutex::new(()),
        }
    }

    /// Cached entry for `raw`, `None` when nothing was saved for it
    pub fn get(&self, raw: &str) -> BoardResult<Option<CachedStats>> {
        let address = TokenAddress::parse(raw)?;
        Ok(self.store.load().remove(&address))
    }

    /// Overwrite the entry for `raw` with `payload` and a fresh timestamp.
    /// The payload must be a JSON object or array.
    pub async fn save(&self, raw: &str, payload: Value) -> BoardResult<CachedStats> {
        let address = TokenAddress::parse(raw)?;
        if !(payload.is_object() || payload.is_array()) {
            return Err(BoardError::InvalidPayload(
                "stats payload must be a JSON object or array".to_string(),
            ));
        }

        let entry = CachedStats {
            timestamp: Utc::now(),
            payload,
        };

        let _guard = self.write_lock.lock().await;
        let mut cache = self.store.load();
        cache.insert(address.clone(), entry.clone());
        self.store.save(&cache)?;

        logger::debug(LogTag::Stats, &format!("Cached stats for {}", address.short()));
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TOKEN: &str = "0xabcabcabcabcabcabcabcabcabcabcabcabcabca";

    fn store_in(dir: &tempfile::TempDir) -> StatsCacheStore {
        StatsCacheStore::new(dir.path().join("token_stats.json"))
    }

    #[tokio::test]
    async fn test_saved_payload_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let before = Utc::now();
        store.save(TOKEN, json!({"x": 1})).await.unwrap();

        let cached = store.get(TOKEN).unwrap().unwrap();
        assert_eq!(cached.payload, json!({"x": 1}));
        assert!(cached.timestamp >= before);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&TOKEN.to_uppercase().replace("0X", "0x"), json!([1, 2])).await.unwrap();
        assert_eq!(store.get(TOKEN).unwrap().unwrap().payload, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(TOKEN, json!({"x": 1})).await.unwrap();
        store.save(TOKEN, json!({"x": 2})).await.unwrap();
        assert_eq!(store.get(TOKEN).unwrap().unwrap().payload, json!({"x": 2}));
    }

    #[tokio::test]
    async fn test_scalar_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for payload in [json!(1), json!("text"), json!(null), json!(true)] {
            let err = store.save(TOKEN, payload).await.unwrap_err();
            assert!(matches!(err, BoardError::InvalidPayload(_)));
        }
        assert!(store.get(TOKEN).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_address_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(store.get("0xabc"), Err(BoardError::InvalidAddress(_))));
        assert!(matches!(
            store.save("0xabc", json!({})).await,
            Err(BoardError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_unknown_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).get(TOKEN).unwrap().is_none());
    }
}
