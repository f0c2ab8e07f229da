//! Poll loop driving discovery, deduplication and alert delivery.

use crate::tracker::{PairDecision, SeenPairs};
use radar_alerts::{AlertFormatter, AlertSink};
use radar_core::PairRecord;
use radar_feeds::PairSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Configuration for the poll loop.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between the end of one cycle and the start of the next.
    pub poll_interval: Duration,
    /// Pause after each alert so bursts don't trip the channel's rate limit.
    pub alert_pause: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            alert_pause: Duration::from_secs(1),
        }
    }
}

/// Loop phase. `Bootstrap` lasts exactly one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Bootstrap,
    Steady,
}

/// What happened during one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub bootstrap: bool,
    pub profiles: usize,
    pub pairs_examined: usize,
    pub newly_seen: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
    pub tracked_pairs: usize,
}

/// Single-task monitor owning the seen-pair state.
pub struct Monitor {
    source: Arc<dyn PairSource>,
    sink: Arc<dyn AlertSink>,
    formatter: AlertFormatter,
    config: MonitorConfig,
    seen: SeenPairs,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn PairSource>,
        sink: Arc<dyn AlertSink>,
        formatter: AlertFormatter,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            sink,
            formatter,
            config,
            seen: SeenPairs::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.seen.is_bootstrapping() {
            Phase::Bootstrap
        } else {
            Phase::Steady
        }
    }

    pub fn tracked_pairs(&self) -> usize {
        self.seen.len()
    }

    /// Run one discovery cycle: profiles, then pairs per profile, then the
    /// seen/alert decision per pair. Leaves `Bootstrap` when done.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport {
            bootstrap: self.phase() == Phase::Bootstrap,
            ..Default::default()
        };

        let profiles = self.source.fetch_new_token_profiles().await;
        report.profiles = profiles.len();

        for profile in &profiles {
            let Some(token) = profile.address() else {
                continue;
            };

            let pairs = self.source.fetch_pairs_for_token(token).await;
            for pair in &pairs {
                report.pairs_examined += 1;
                match self.seen.decide(pair) {
                    PairDecision::MissingAddress | PairDecision::AlreadySeen => {}
                    PairDecision::Seeded | PairDecision::NoLiquidity => report.newly_seen += 1,
                    PairDecision::Alert => {
                        report.newly_seen += 1;
                        if self.deliver(pair, token).await {
                            report.alerts_sent += 1;
                        } else {
                            report.alerts_failed += 1;
                        }
                        if !self.config.alert_pause.is_zero() {
                            tokio::time::sleep(self.config.alert_pause).await;
                        }
                    }
                }
            }
        }

        if self.seen.is_bootstrapping() {
            self.seen.finish_bootstrap();
            info!(
                "First run complete. Seeded {} existing pairs. Now watching for NEW pairs...",
                self.seen.len()
            );
        } else {
            info!(
                "Cycle complete. Sent {} alerts. Watching {} pairs. Sleeping {}s...",
                report.alerts_sent,
                self.seen.len(),
                self.config.poll_interval.as_secs()
            );
        }

        report.tracked_pairs = self.seen.len();
        report
    }

    /// Format and hand one alert to the sink. Failures are logged and dropped.
    async fn deliver(&self, pair: &PairRecord, token: &str) -> bool {
        let message = self.formatter.format(pair, Some(token));
        let pair_address = pair.address().unwrap_or_default();

        match self.sink.send(&message).await {
            Ok(()) => {
                info!(pair = pair_address, "Alert sent.");
                true
            }
            Err(e) => {
                error!(pair = pair_address, error = %e, "Failed to send alert");
                false
            }
        }
    }

    /// Poll forever. Only process shutdown stops this.
    pub async fn run(&mut self) {
        info!(
            "🔭 {} Liquidity Radar started. Monitoring DexScreener...",
            self.formatter.chain()
        );

        loop {
            let report = self.run_cycle().await;
            debug!(?report, "Cycle report");
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
