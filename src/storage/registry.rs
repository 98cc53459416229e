/// Token registry store: tracked tokens and their discovered pair addresses
///
/// Every mutation is load → mutate → save under an in-process lock, so the
/// file on disk is re-read before each write instead of being held open for
/// the lifetime of a scan.
use super::JsonStore;
use crate::errors::BoardResult;
use crate::logger::{self, LogTag};
use crate::types::{PairAddress, TokenAddress, TokenRegistry};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct RegistryStore {
    store: JsonStore<TokenRegistry>,
    write_lock: Mutex<()>,
}

impl RegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path, LogTag::Registry),
            write_lock: Mutex::new(()),
        }
    }

    pub fn load(&self) -> TokenRegistry {
        self.store.load()
    }

    /// Register a token. Validates the address before any I/O; re-adding a
    /// tracked token is a no-op. Returns the normalized address and the registry
    /// as it stands afterwards.
    pub async fn add_token(&self, raw: &str) -> BoardResult<(TokenAddress, TokenRegistry)> {
        let address = TokenAddress::parse(raw)?;

        let _guard = self.write_lock.lock().await;
        let mut registry = self.store.load();
        if registry.insert_token(&address) {
            self.store.save(&registry)?;
            logger::info(
                LogTag::Registry,
                &format!("Tracking {} ({} tokens)", address, registry.tokens.len()),
            );
        } else {
            logger::debug(LogTag::Registry, &format!("{} already tracked", address));
        }

        Ok((address, registry))
    }

    /// Union newly discovered pairs into the token's known set and return the merged set.
    /// Nothing is written when the set does not grow.
    pub async fn merge_pairs(
        &self,
        token: &TokenAddress,
        new_pairs: &[PairAddress],
    ) -> BoardResult<BTreeSet<PairAddress>> {
        let _guard = self.write_lock.lock().await;
        let mut registry = self.store.load();

        if registry.union_pairs(token, new_pairs) {
            self.store.save(&registry)?;
            logger::debug(
                LogTag::Registry,
                &format!(
                    "Known pairs for {} grew to {}",
                    token.short(),
                    registry.known_pairs(token).map(|set| set.len()).unwrap_or(0)
                ),
            );
        }

        Ok(registry.known_pairs(token).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::testing::{address, token};
    use crate::errors::BoardError;

    fn store_in(dir: &tempfile::TempDir) -> RegistryStore {
        RegistryStore::new(dir.path().join("tokens.json"))
    }

    #[tokio::test]
    async fn test_add_token_twice_tracks_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.add_token(&address('a')).await.unwrap();
        let (_, registry) = store.add_token(&address('A')).await.unwrap();

        assert_eq!(registry.tokens, vec![token('a')]);
        assert_eq!(store.load().tokens, vec![token('a')]);
    }

    #[tokio::test]
    async fn test_add_token_rejects_short_address() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add_token(&address('a')).await.unwrap();

        let err = store.add_token("0x1234").await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidAddress(_)));
        assert_eq!(store.load().tokens, vec![token('a')]);
    }

    #[tokio::test]
    async fn test_invalid_address_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.add_token("0x1234").await.is_err());
        assert!(!dir.path().join("tokens.json").exists());
    }

    #[tokio::test]
    async fn test_merge_pairs_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let pairs = vec![token('b'), token('c')];

        let first = store.merge_pairs(&token('a'), &pairs).await.unwrap();
        let second = store.merge_pairs(&token('a'), &pairs).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
        assert_eq!(store.load().known_pairs(&token('a')), Some(&second));
    }

    #[tokio::test]
    async fn test_merge_pairs_grows_monotonically() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.merge_pairs(&token('a'), &[token('b')]).await.unwrap();
        let merged = store.merge_pairs(&token('a'), &[token('c')]).await.unwrap();
        assert!(merged.contains(&token('b')));
        assert!(merged.contains(&token('c')));
    }

    #[tokio::test]
    async fn test_merge_empty_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let merged = store.merge_pairs(&token('a'), &[]).await.unwrap();
        assert!(merged.is_empty());
        assert!(!dir.path().join("tokens.json").exists());
    }

    #[tokio::test]
    async fn test_corrupt_registry_self_heals() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tokens.json"), b"[[[").unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load(), TokenRegistry::default());
        let (_, registry) = store.add_token(&address('d')).await.unwrap();
        assert_eq!(registry.tokens, vec![token('d')]);
    }

    #[tokio::test]
    async fn test_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add_token(&address('a')).await.unwrap();
        store.merge_pairs(&token('a'), &[token('b')]).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("tokens.json")).unwrap()).unwrap();
        assert_eq!(raw["tokens"][0], address('a'));
        assert_eq!(raw["pairs"][address('a')][0], address('b'));
    }
}
