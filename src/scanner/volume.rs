/// 24h volume resolution with pair discovery
///
/// Searching the provider by token address yields the token's pairs; the
/// matching ones are summed and merged into the registry's known-pair set, so
/// each token's pair set grows as new pools appear. When the search turns up
/// nothing for the token, the overview's own 24h volume is used instead.
use crate::apis::{MarketDataProvider, PairRecord};
use crate::errors::BoardResult;
use crate::logger::{self, LogTag};
use crate::storage::RegistryStore;
use crate::types::{PairAddress, TokenAddress};

/// Missing, negative or non-finite volumes count as zero
fn volume_of(record: &PairRecord) -> f64 {
    record
        .volume_h24
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Resolve a token's 24h volume. Provider errors count as zero; only a failed
/// registry write is returned.
///
/// `overview` is the already-fetched overview record, if any; it is used for the
/// fallback instead of fetching again.
pub async fn resolve_volume_24h(
    provider: &dyn MarketDataProvider,
    registry: &RegistryStore,
    token: &TokenAddress,
    overview: Option<&PairRecord>,
) -> BoardResult<f64> {
    let found = match provider.search_pairs(token.as_str()).await {
        Ok(pairs) => pairs,
        Err(e) => {
            logger::debug(LogTag::Scanner, &format!("Pair search failed for {}: {}", token.short(), e));
            Vec::new()
        }
    };

    let matching: Vec<&PairRecord> = found
        .iter()
        .filter(|pair| pair.has_base_token(token.as_str()))
        .collect();

    if !matching.is_empty() {
        let total: f64 = matching.iter().map(|pair| volume_of(pair)).sum();

        let addresses: Vec<PairAddress> = matching
            .iter()
            .filter_map(|pair| pair.pair_address.as_deref())
            .filter_map(|raw| PairAddress::parse(raw).ok())
            .collect();

        registry.merge_pairs(token, &addresses).await?;

        logger::debug(
            LogTag::Scanner,
            &format!(
                "{}: {} matching pairs of {} results, volume {:.2}",
                token.short(),
                matching.len(),
                found.len(),
                total
            ),
        );
        return Ok(total);
    }

    if let Some(record) = overview {
        return Ok(volume_of(record));
    }

    match provider.fetch_token_overview(token).await {
        Ok(record) => Ok(volume_of(&record)),
        Err(e) => {
            logger::debug(
                LogTag::Scanner,
                &format!("Overview fallback failed for {}: {}", token.short(), e),
            );
            Ok(0.0)
        }
    }
}
