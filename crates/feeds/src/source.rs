//! Data source abstraction consumed by the poll loop.

use crate::DexScreenerClient;
use async_trait::async_trait;
use radar_core::{PairRecord, TokenProfile};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source of newly profiled tokens and their pairs.
///
/// Implementations never fail: errors are logged and surface as empty results.
#[async_trait]
pub trait PairSource: Send + Sync {
    /// Newly profiled tokens on the monitored chain.
    async fn fetch_new_token_profiles(&self) -> Vec<TokenProfile>;

    /// Trading pairs listed for a token address.
    async fn fetch_pairs_for_token(&self, address: &str) -> Vec<PairRecord>;
}

#[async_trait]
impl PairSource for DexScreenerClient {
    async fn fetch_new_token_profiles(&self) -> Vec<TokenProfile> {
        DexScreenerClient::fetch_new_token_profiles(self).await
    }

    async fn fetch_pairs_for_token(&self, address: &str) -> Vec<PairRecord> {
        DexScreenerClient::fetch_pairs_for_token(self, address).await
    }
}

/// In-memory source for testing. Contents can be changed between cycles.
#[derive(Default)]
pub struct MockPairSource {
    profiles: Mutex<Vec<TokenProfile>>,
    pairs: Mutex<HashMap<String, Vec<PairRecord>>>,
    /// Simulates a provider outage: every call returns nothing.
    pub offline: AtomicBool,
    profile_calls: AtomicUsize,
    pair_calls: AtomicUsize,
}

impl MockPairSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token and the pairs the provider lists for it.
    pub fn set_token(&self, profile: TokenProfile, pairs: Vec<PairRecord>) {
        let Some(address) = profile.token_address.clone() else {
            return;
        };

        if let Ok(mut profiles) = self.profiles.lock() {
            profiles.retain(|p| p.token_address.as_deref() != Some(address.as_str()));
            profiles.push(profile);
        }
        if let Ok(mut map) = self.pairs.lock() {
            map.insert(address, pairs);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of profile fetches so far (one per poll cycle).
    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn pair_calls(&self) -> usize {
        self.pair_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PairSource for MockPairSource {
    async fn fetch_new_token_profiles(&self) -> Vec<TokenProfile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Vec::new();
        }
        self.profiles.lock().map(|p| p.clone()).unwrap_or_default()
    }

    async fn fetch_pairs_for_token(&self, address: &str) -> Vec<PairRecord> {
        self.pair_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Vec::new();
        }
        self.pairs
            .lock()
            .ok()
            .and_then(|map| map.get(address).cloned())
            .unwrap_or_default()
    }
}
