/// Rankings and banners computed from a scan's rows
use super::rows::clamp_volume;
use crate::constants::RANKING_SIZE;
use crate::types::{Banner, BannerSpecial, TokenRow};
use std::cmp::Ordering;

/// Descending order with unknown values last. Equal keys keep their input order
/// because callers use a stable sort.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ranked_by<F>(rows: &[TokenRow], key: F) -> Vec<TokenRow>
where
    F: Fn(&TokenRow) -> Option<f64>,
{
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| descending(key(a), key(b)));
    ranked.truncate(RANKING_SIZE);
    ranked
}

/// Rows by 24h price change, highest first
pub fn top_gainers(rows: &[TokenRow]) -> Vec<TokenRow> {
    ranked_by(rows, |row| row.change_24h.filter(|v| v.is_finite()))
}

/// Rows by aggregated 24h volume, highest first
pub fn top_volume(rows: &[TokenRow]) -> Vec<TokenRow> {
    ranked_by(rows, |row| Some(row.volume_24h))
}

/// Aggregate banner. The 24h change stays unset; holders are filled in by the
/// display client.
///
/// Capitalization is the first provider-reported market cap in row order, and
/// only when no row has one, the first FDV.
pub fn general_banner(rows: &[TokenRow], link: &str) -> Banner {
    let market_cap = rows
        .iter()
        .find_map(|row| row.reported_market_cap)
        .or_else(|| rows.iter().find_map(|row| row.fdv));

    Banner {
        holders: None,
        market_cap,
        volume_24h: clamp_volume(rows.iter().map(|row| row.volume_24h).sum()),
        change_24h: None,
        link: link.to_string(),
    }
}

pub fn special_banner(row: &TokenRow) -> BannerSpecial {
    BannerSpecial {
        address: row.base_address.clone(),
        name: row.name.clone(),
        symbol: row.symbol.clone(),
        holders: None,
        market_cap: row.market_cap,
        volume_24h: row.volume_24h,
        change_24h: row.change_24h,
        link: row.url.clone(),
    }
}
