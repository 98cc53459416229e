/// DexScreener wire types and their normalized form
///
/// Overview (`/tokens/v1/{chain}/{address}`) and search (`/latest/dex/search`)
/// both return pair objects of the same shape. Numeric fields arrive as JSON
/// numbers or numeric strings depending on the endpoint, so they are read as
/// raw values and normalized by [`numeric`].
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized pair/overview record handed to the scan pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub pair_address: Option<String>,
    pub base_token_address: Option<String>,
    pub base_token_name: Option<String>,
    pub base_token_symbol: Option<String>,
    pub price_change_m5: Option<f64>,
    pub price_change_h1: Option<f64>,
    pub price_change_h6: Option<f64>,
    pub price_change_h24: Option<f64>,
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    pub volume_h24: Option<f64>,
    pub url: Option<String>,
}

impl PairRecord {
    /// True when the pair's base token is `address` (case-insensitive)
    pub fn has_base_token(&self, address: &str) -> bool {
        self.base_token_address
            .as_deref()
            .map(|base| base.trim().eq_ignore_ascii_case(address.trim()))
            .unwrap_or(false)
    }
}

/// Read a provider number that may be a JSON number or a numeric string
pub fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn numeric_opt(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(numeric)
}

// ===== Response Types =====

#[derive(Debug, Deserialize)]
pub struct PairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexScreenerPairRaw>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexScreenerPairRaw {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<TokenInfo>,
    pub quote_token: Option<TokenInfo>,
    pub volume: Option<WindowValues>,
    pub price_change: Option<WindowValues>,
    pub fdv: Option<Value>,
    pub market_cap: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TokenInfo {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Per-window figures (`m5`, `h1`, `h6`, `h24`)
#[derive(Debug, Default, Deserialize)]
pub struct WindowValues {
    pub m5: Option<Value>,
    pub h1: Option<Value>,
    pub h6: Option<Value>,
    pub h24: Option<Value>,
}

impl DexScreenerPairRaw {
    pub fn to_record(&self) -> PairRecord {
        let mut record = PairRecord {
            pair_address: self.pair_address.clone(),
            url: self.url.clone(),
            fdv: numeric_opt(&self.fdv),
            market_cap: numeric_opt(&self.market_cap),
            ..PairRecord::default()
        };

        if let Some(ref base) = self.base_token {
            record.base_token_address = base.address.clone();
            record.base_token_name = base.name.clone();
            record.base_token_symbol = base.symbol.clone();
        }

        if let Some(ref pc) = self.price_change {
            record.price_change_m5 = numeric_opt(&pc.m5);
            record.price_change_h1 = numeric_opt(&pc.h1);
            record.price_change_h6 = numeric_opt(&pc.h6);
            record.price_change_h24 = numeric_opt(&pc.h24);
        }

        if let Some(ref volume) = self.volume {
            record.volume_h24 = numeric_opt(&volume.h24);
        }

        record
    }
}
