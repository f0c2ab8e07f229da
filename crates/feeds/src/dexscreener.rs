//! DexScreener REST client.
//!
//! Two chained read-only calls: the latest token profiles feed, then the
//! pairs listed for each token address. The infallible wrappers log failures
//! and return empty results so one bad cycle never reaches the caller.

use crate::FeedError;
use radar_core::{Chain, PairRecord, TokenProfile};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Configuration for the DexScreener client.
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// Provider base URL, without trailing slash.
    pub base_url: String,
    /// Chain whose token profiles are kept.
    pub chain: Chain,
    /// Upper bound on each request, connect through body.
    pub request_timeout: Duration,
}

impl DexScreenerConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.dexscreener.com";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            chain: Chain::Solana,
            request_timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Envelope of the pairs-by-token endpoint. `pairs` may be `null`.
#[derive(Debug, Default, Deserialize)]
struct PairsEnvelope {
    #[serde(default)]
    pairs: Option<Vec<Value>>,
}

/// Decode records one at a time, skipping the ones that don't fit.
fn decode_records<T: DeserializeOwned>(records: Vec<Value>, kind: &'static str) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(kind = kind, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// DexScreener market-data client.
pub struct DexScreenerClient {
    client: reqwest::Client,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    pub fn new(mut config: DexScreenerConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FeedError::ClientBuild(e.to_string()))?;

        let trimmed = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(trimmed);

        Ok(Self { client, config })
    }

    fn profiles_url(&self) -> String {
        format!("{}/token-profiles/latest/v1", self.config.base_url)
    }

    fn pairs_url(&self, address: &str) -> String {
        format!("{}/latest/dex/tokens/{}", self.config.base_url, address)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the latest token profiles, keeping only the monitored chain.
    pub async fn try_fetch_token_profiles(&self) -> Result<Vec<TokenProfile>, FeedError> {
        let records: Vec<Value> = self.get_json(&self.profiles_url()).await?;
        let slug = self.config.chain.slug();

        Ok(decode_records::<TokenProfile>(records, "token profile")
            .into_iter()
            .filter(|p| p.is_on_chain(slug))
            .collect())
    }

    /// Fetch every pair the provider lists for a token address.
    pub async fn try_fetch_pairs_for_token(
        &self,
        address: &str,
    ) -> Result<Vec<PairRecord>, FeedError> {
        let envelope: PairsEnvelope = self.get_json(&self.pairs_url(address)).await?;
        Ok(decode_records(envelope.pairs.unwrap_or_default(), "pair"))
    }

    /// Latest token profiles on the monitored chain; empty on any failure.
    pub async fn fetch_new_token_profiles(&self) -> Vec<TokenProfile> {
        match self.try_fetch_token_profiles().await {
            Ok(profiles) => {
                info!(
                    "Found {} {} token profiles.",
                    profiles.len(),
                    self.config.chain
                );
                profiles
            }
            Err(FeedError::Status(code)) => {
                warn!("Token profiles returned {}", code);
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, transient = e.is_transient(), "Error fetching token profiles");
                Vec::new()
            }
        }
    }

    /// Pairs for one token; empty on any failure.
    pub async fn fetch_pairs_for_token(&self, address: &str) -> Vec<PairRecord> {
        match self.try_fetch_pairs_for_token(address).await {
            Ok(pairs) => {
                debug!(address = address, pairs = pairs.len(), "Fetched pairs");
                pairs
            }
            Err(FeedError::Status(code)) => {
                debug!(address = address, status = code, "Pairs request rejected");
                Vec::new()
            }
            Err(e) => {
                error!(address = address, error = %e, "Error fetching pairs");
                Vec::new()
            }
        }
    }
}
