/// TokenBoard facade: the operations exposed to the binary and the request layer
use crate::apis::MarketDataProvider;
use crate::errors::BoardResult;
use crate::logger::{self, LogTag};
use crate::paths;
use crate::scanner::{ScanCoordinator, ScanOutcome, ScanSettings, SnapshotBuilder};
use crate::storage::{RegistryStore, SnapshotStore, StatsCacheStore};
use crate::types::{CachedStats, Snapshot, TokenAddress, TokenRow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Locations of the three persisted documents
#[derive(Debug, Clone, PartialEq)]
pub struct StorePaths {
    pub registry: PathBuf,
    pub snapshots: PathBuf,
    pub token_stats: PathBuf,
}

impl StorePaths {
    /// Standard file names inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            registry: dir.join("tokens.json"),
            snapshots: dir.join("snapshots.json"),
            token_stats: dir.join("token_stats.json"),
        }
    }

    /// Paths resolved from the environment and command line
    pub fn resolve() -> Self {
        Self {
            registry: paths::get_registry_path(),
            snapshots: paths::get_snapshots_path(),
            token_stats: paths::get_token_stats_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedToken {
    pub row: TokenRow,
    pub tokens_tracked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedToken {
    pub address: TokenAddress,
    pub known_pairs: usize,
}

pub struct TokenBoard {
    registry: Arc<RegistryStore>,
    snapshots: Arc<SnapshotStore>,
    stats: StatsCacheStore,
    coordinator: Arc<ScanCoordinator>,
}

impl TokenBoard {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: ScanSettings, stores: &StorePaths) -> Self {
        let registry = Arc::new(RegistryStore::new(&stores.registry));
        let snapshots = Arc::new(SnapshotStore::open(&stores.snapshots));
        let builder = SnapshotBuilder::new(provider, registry.clone(), settings);

        Self {
            coordinator: Arc::new(ScanCoordinator::new(builder, snapshots.clone())),
            stats: StatsCacheStore::new(&stores.token_stats),
            registry,
            snapshots,
        }
    }

    /// Shared handle for the periodic scan loop
    pub fn coordinator(&self) -> Arc<ScanCoordinator> {
        self.coordinator.clone()
    }

    /// Run a scan, or return the latest snapshot if one is already in flight
    pub async fn trigger_scan(&self) -> BoardResult<ScanOutcome> {
        self.coordinator.run_scan().await
    }

    /// Latest persisted snapshot. Never starts a scan.
    pub fn latest_snapshot(&self) -> Option<Snapshot> {
        self.snapshots.latest()
    }

    /// Register a token and compute its current row.
    ///
    /// The address is validated before any I/O. Registration happens first, so
    /// a provider failure is reported to the caller while the token stays tracked
    /// for the next scan.
    pub async fn add_token(&self, raw: &str) -> BoardResult<AddedToken> {
        let (address, registry) = self.registry.add_token(raw).await?;
        let row = self.coordinator.builder().build_token_row(&address).await?;

        logger::info(
            LogTag::Registry,
            &format!("Added {} ({}), volume {:.2}", row.symbol, address.short(), row.volume_24h),
        );
        Ok(AddedToken {
            row,
            tokens_tracked: registry.tokens.len(),
        })
    }

    pub fn list_tokens(&self) -> Vec<TrackedToken> {
        let registry = self.registry.load();
        registry
            .tokens
            .iter()
            .map(|address| TrackedToken {
                address: address.clone(),
                known_pairs: registry.known_pairs(address).map(|set| set.len()).unwrap_or(0),
            })
            .collect()
    }

    pub fn get_cached_stats(&self, raw: &str) -> BoardResult<Option<CachedStats>> {
        self.stats.get(raw)
    }

    pub async fn save_cached_stats(&self, raw: &str, payload: Value) -> BoardResult<CachedStats> {
        self.stats.save(raw, payload).await
    }
}
