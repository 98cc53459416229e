/// Maps a provider overview record plus a resolved volume into a [`TokenRow`]
use crate::apis::PairRecord;
use crate::constants::token_page_url;
use crate::types::{TokenAddress, TokenRow};

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Negative and NaN volumes become zero; an overflowed sum saturates at `f64::MAX`
pub(crate) fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, f64::MAX)
    }
}

/// Pure; absent numbers stay absent except volume.
///
/// Fallbacks: market cap → FDV, name → symbol, symbol → short address,
/// url → token page on the provider site.
pub fn build_row(overview: &PairRecord, token: &TokenAddress, volume_24h: f64) -> TokenRow {
    let symbol = text(&overview.base_token_symbol).unwrap_or_else(|| token.short());
    let name = text(&overview.base_token_name).unwrap_or_else(|| symbol.clone());

    TokenRow {
        base_address: token.clone(),
        name,
        symbol,
        change_5m: overview.price_change_m5,
        change_1h: overview.price_change_h1,
        change_6h: overview.price_change_h6,
        change_24h: overview.price_change_h24,
        market_cap: overview.market_cap.or(overview.fdv),
        fdv: overview.fdv,
        volume_24h: clamp_volume(volume_24h),
        url: text(&overview.url).unwrap_or_else(|| token_page_url(token.as_str())),
        reported_market_cap: overview.market_cap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::testing::{address, overview, token};

    #[test]
    fn test_market_cap_preferred_over_fdv() {
        let mut record = overview(&address('a'), "AAA", Some(3.0), None);
        record.market_cap = Some(100.0);
        record.fdv = Some(250.0);

        let row = build_row(&record, &token('a'), 10.0);
        assert_eq!(row.market_cap, Some(100.0));
        assert_eq!(row.fdv, Some(250.0));
        assert_eq!(row.change_24h, Some(3.0));
        assert_eq!(row.volume_24h, 10.0);
    }

    #[test]
    fn test_fdv_fills_missing_market_cap() {
        let mut record = overview(&address('a'), "AAA", None, None);
        record.fdv = Some(250.0);
        let row = build_row(&record, &token('a'), 0.0);
        assert_eq!(row.market_cap, Some(250.0));
        assert_eq!(row.reported_market_cap, None);
    }

    #[test]
    fn test_absent_fields_stay_unknown() {
        let row = build_row(&PairRecord::default(), &token('a'), 0.0);
        assert_eq!(row.change_5m, None);
        assert_eq!(row.change_24h, None);
        assert_eq!(row.market_cap, None);
        assert_eq!(row.fdv, None);
        assert_eq!(row.volume_24h, 0.0);
        assert_eq!(row.symbol, token('a').short());
        assert_eq!(row.name, row.symbol);
        assert_eq!(row.url, token_page_url(&address('a')));
    }

    #[test]
    fn test_overflowed_volume_saturates() {
        let record = overview(&address('a'), "AAA", None, None);
        assert_eq!(build_row(&record, &token('a'), f64::INFINITY).volume_24h, f64::MAX);
        assert_eq!(build_row(&record, &token('a'), f64::NAN).volume_24h, 0.0);
        assert_eq!(build_row(&record, &token('a'), -4.0).volume_24h, 0.0);
    }

    #[test]
    fn test_base_address_is_the_tracked_token() {
        let record = overview(&address('b'), "BBB", None, None);
        assert_eq!(build_row(&record, &token('a'), 1.0).base_address, token('a'));
    }
}
