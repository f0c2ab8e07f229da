//! Blockchain chain identifiers as used by DexScreener.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Blockchain network a radar instance can monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Arbitrum,
    Optimism,
    Base,
    Polygon,
    Avalanche,
    Bsc,
    #[default]
    Solana,
}

/// Returned when a chain slug is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chain: {0}")]
pub struct UnknownChain(pub String);

impl Chain {
    /// Chain identifier used in DexScreener `chainId` fields and chart URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
            Chain::Base => "base",
            Chain::Polygon => "polygon",
            Chain::Avalanche => "avalanche",
            Chain::Bsc => "bsc",
            Chain::Solana => "solana",
        }
    }

    /// Human readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Arbitrum => "Arbitrum",
            Chain::Optimism => "Optimism",
            Chain::Base => "Base",
            Chain::Polygon => "Polygon",
            Chain::Avalanche => "Avalanche",
            Chain::Bsc => "BSC",
            Chain::Solana => "Solana",
        }
    }

    /// Get all chain variants.
    pub fn all() -> &'static [Chain] {
        &[
            Chain::Ethereum,
            Chain::Arbitrum,
            Chain::Optimism,
            Chain::Base,
            Chain::Polygon,
            Chain::Avalanche,
            Chain::Bsc,
            Chain::Solana,
        ]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Chain::all()
            .iter()
            .copied()
            .find(|chain| chain.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}
