/// Snapshot builder: one full pass over the tracked tokens
use super::ranking::{general_banner, special_banner, top_gainers, top_volume};
use super::rows::build_row;
use super::volume::resolve_volume_24h;
use crate::apis::MarketDataProvider;
use crate::config::ScannerConfig;
use crate::constants::{chain_page_url, CHAIN_ID};
use crate::errors::{BoardError, BoardResult};
use crate::logger::{self, LogTag};
use crate::storage::RegistryStore;
use crate::types::{BannerSpecial, Snapshot, TokenAddress, TokenRow};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runtime scan settings derived from [`ScannerConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSettings {
    pub token_delay: Duration,
    pub token_timeout: Duration,
    pub home_token: TokenAddress,
    pub banner_link: String,
}

impl ScanSettings {
    pub fn from_config(config: &ScannerConfig) -> BoardResult<Self> {
        let banner_link = if config.banner_link.trim().is_empty() {
            chain_page_url()
        } else {
            config.banner_link.trim().to_string()
        };

        Ok(Self {
            token_delay: Duration::from_millis(config.token_delay_ms),
            token_timeout: Duration::from_secs(config.token_timeout_secs.max(1)),
            home_token: TokenAddress::parse(&config.home_token)?,
            banner_link,
        })
    }
}

pub struct SnapshotBuilder {
    provider: Arc<dyn MarketDataProvider>,
    registry: Arc<RegistryStore>,
    settings: ScanSettings,
}

impl SnapshotBuilder {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        registry: Arc<RegistryStore>,
        settings: ScanSettings,
    ) -> Self {
        Self {
            provider,
            registry,
            settings,
        }
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Overview + volume + row for one token. Overview failures and failed
    /// pair merges propagate.
    pub async fn build_token_row(&self, token: &TokenAddress) -> BoardResult<TokenRow> {
        let overview = self.provider.fetch_token_overview(token).await?;
        let volume =
            resolve_volume_24h(self.provider.as_ref(), &self.registry, token, Some(&overview)).await?;
        Ok(build_row(&overview, token, volume))
    }

    /// [`Self::build_token_row`] bounded by the per-token timeout
    async fn build_token_row_bounded(&self, token: &TokenAddress) -> BoardResult<TokenRow> {
        match tokio::time::timeout(self.settings.token_timeout, self.build_token_row(token)).await {
            Ok(result) => result,
            Err(_) => Err(BoardError::Upstream(format!(
                "timed out after {}s",
                self.settings.token_timeout.as_secs()
            ))),
        }
    }

    /// Build a snapshot from the current registry. Tokens that fail are left
    /// out; the scan itself never fails.
    pub async fn build_snapshot(&self) -> Snapshot {
        let started = Instant::now();
        let registry = self.registry.load();
        let mut rows: Vec<TokenRow> = Vec::with_capacity(registry.tokens.len());

        for (index, token) in registry.tokens.iter().enumerate() {
            if index > 0 && !self.settings.token_delay.is_zero() {
                tokio::time::sleep(self.settings.token_delay).await;
            }

            match self.build_token_row_bounded(token).await {
                Ok(row) => rows.push(row),
                Err(e) => logger::warning(
                    LogTag::Scanner,
                    &format!("Skipping {} this scan: {}", token.short(), e),
                ),
            }
        }

        let banner_special = self.resolve_special_banner(&rows).await;

        let snapshot = Snapshot {
            timestamp: Utc::now(),
            chain: CHAIN_ID.to_string(),
            banner: general_banner(&rows, &self.settings.banner_link),
            banner_special,
            top_gainers: top_gainers(&rows),
            top_volume: top_volume(&rows),
            tokens_tracked: rows.len(),
        };

        logger::info(
            LogTag::Scanner,
            &format!(
                "Scan built {} of {} tokens in {:.1}s",
                rows.len(),
                registry.tokens.len(),
                started.elapsed().as_secs_f64()
            ),
        );
        snapshot
    }

    /// Home token banner, from the scanned rows when present, otherwise fetched
    async fn resolve_special_banner(&self, rows: &[TokenRow]) -> Option<BannerSpecial> {
        let home = &self.settings.home_token;
        if let Some(row) = rows.iter().find(|row| &row.base_address == home) {
            return Some(special_banner(row));
        }

        match self.build_token_row_bounded(home).await {
            Ok(row) => Some(special_banner(&row)),
            Err(e) => {
                logger::debug(
                    LogTag::Scanner,
                    &format!("Home token banner unavailable: {}", e),
                );
                None
            }
        }
    }
}
