//! Token profile and trading pair records returned by the market-data provider.
//!
//! Every wire field is optional: the provider omits or nulls fields freely and
//! a single malformed record must not fail a whole poll cycle.

use serde::{Deserialize, Deserializer, Serialize};

/// Recently profiled token, as listed by the provider's latest-profiles feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProfile {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub token_address: Option<String>,
}

impl TokenProfile {
    pub fn new(chain_id: &str, token_address: &str) -> Self {
        Self {
            chain_id: Some(chain_id.to_string()),
            token_address: Some(token_address.to_string()),
        }
    }

    /// Token address, if present and non-empty.
    pub fn address(&self) -> Option<&str> {
        non_empty(self.token_address.as_deref())
    }

    /// Whether this profile belongs to the chain with the given slug.
    pub fn is_on_chain(&self, slug: &str) -> bool {
        self.chain_id.as_deref() == Some(slug)
    }
}

/// Base token of a pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseToken {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Pool liquidity as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

/// A trading pair on a DEX. Identity is the pair address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairRecord {
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub base_token: Option<BaseToken>,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub liquidity: Option<Liquidity>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price_usd: Option<String>,
}

/// Accept the price as a string or a bare number; anything else is absent.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Text(String),
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Text(text)) => Some(text),
        Some(RawPrice::Number(n)) => Some(n.to_string()),
        Some(RawPrice::Other(_)) | None => None,
    })
}

impl PairRecord {
    /// Pair address, if present and non-empty.
    pub fn address(&self) -> Option<&str> {
        non_empty(self.pair_address.as_deref())
    }

    /// Liquidity in USD; absent values count as zero.
    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .unwrap_or(0.0)
    }

    pub fn has_liquidity(&self) -> bool {
        self.liquidity_usd() > 0.0
    }

    pub fn token_name(&self) -> Option<&str> {
        self.base_token.as_ref().and_then(|t| non_empty(t.name.as_deref()))
    }

    pub fn token_symbol(&self) -> Option<&str> {
        self.base_token
            .as_ref()
            .and_then(|t| non_empty(t.symbol.as_deref()))
    }

    pub fn token_address(&self) -> Option<&str> {
        self.base_token
            .as_ref()
            .and_then(|t| non_empty(t.address.as_deref()))
    }

    pub fn dex(&self) -> Option<&str> {
        non_empty(self.dex_id.as_deref())
    }

    pub fn price(&self) -> Option<&str> {
        non_empty(self.price_usd.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
