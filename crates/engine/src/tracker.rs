//! Seen-pair tracking and the first-sighting alert decision.

use radar_core::PairRecord;
use std::collections::HashSet;

/// Outcome of evaluating one discovered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairDecision {
    /// No pair address on the record.
    MissingAddress,
    /// Already recorded in an earlier sighting.
    AlreadySeen,
    /// Newly recorded during the bootstrap cycle; never alerted.
    Seeded,
    /// Newly recorded but with no liquidity; never alerted.
    NoLiquidity,
    /// Newly recorded with liquidity: send an alert.
    Alert,
}

/// Pair addresses observed so far plus the one-shot bootstrap flag.
///
/// The set only grows. A pair is recorded before its liquidity is looked at,
/// so each address gets at most one alert and liquidity is only evaluated on
/// first sighting.
#[derive(Debug)]
pub struct SeenPairs {
    seen: HashSet<String>,
    bootstrapping: bool,
}

impl Default for SeenPairs {
    fn default() -> Self {
        Self::new()
    }
}

impl SeenPairs {
    /// Empty tracker in the bootstrap state.
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            bootstrapping: true,
        }
    }

    pub fn is_new(&self, pair_address: &str) -> bool {
        !self.seen.contains(pair_address)
    }

    /// Record an address. Returns true if it was not seen before.
    pub fn mark_seen(&mut self, pair_address: &str) -> bool {
        if self.seen.contains(pair_address) {
            return false;
        }
        self.seen.insert(pair_address.to_string())
    }

    pub fn is_bootstrapping(&self) -> bool {
        self.bootstrapping
    }

    /// Leave the bootstrap state. Idempotent; there is no way back.
    pub fn finish_bootstrap(&mut self) {
        self.bootstrapping = false;
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Evaluate a discovered pair, recording it if new.
    pub fn decide(&mut self, pair: &PairRecord) -> PairDecision {
        let Some(address) = pair.address() else {
            return PairDecision::MissingAddress;
        };

        if !self.mark_seen(address) {
            return PairDecision::AlreadySeen;
        }

        if self.bootstrapping {
            return PairDecision::Seeded;
        }

        if pair.has_liquidity() {
            PairDecision::Alert
        } else {
            PairDecision::NoLiquidity
        }
    }
}
