use pretty_assertions::assert_eq;
use radar_alerts::{AlertFormatter, MockAlertSink};
use radar_core::{BaseToken, Chain, Liquidity, PairRecord, TokenProfile};
use radar_engine::{Monitor, MonitorConfig, Phase};
use radar_feeds::MockPairSource;
use std::sync::Arc;
use std::time::Duration;

fn pair(address: &str, name: &str, liquidity: Option<f64>) -> PairRecord {
    PairRecord {
        pair_address: Some(address.to_string()),
        base_token: Some(BaseToken {
            name: Some(name.to_string()),
            symbol: Some(name.to_uppercase()),
            address: Some(format!("{}_MINT", address)),
        }),
        dex_id: Some("orca".to_string()),
        liquidity: Some(Liquidity { usd: liquidity }),
        price_usd: Some("1.25".to_string()),
    }
}

fn new_monitor(source: Arc<MockPairSource>, sink: Arc<MockAlertSink>) -> Monitor {
    Monitor::new(
        source,
        sink,
        AlertFormatter::new(Chain::Solana),
        MonitorConfig {
            poll_interval: Duration::from_millis(5),
            alert_pause: Duration::from_millis(1),
        },
    )
}

#[tokio::test]
async fn test_bootstrap_then_single_alert_for_new_pair() {
    let source = Arc::new(MockPairSource::new());
    let sink = Arc::new(MockAlertSink::new());
    let mut monitor = new_monitor(source.clone(), sink.clone());

    // Cycle 1: bootstrap discovers P1 and P2.
    source.set_token(
        TokenProfile::new("solana", "TOKEN_A"),
        vec![pair("P1", "alpha", Some(20_000.0)), pair("P2", "beta", Some(3_000_000.0))],
    );
    let first = monitor.run_cycle().await;
    assert!(first.bootstrap);
    assert_eq!(first.tracked_pairs, 2);
    assert_eq!(sink.sent_count(), 0);
    assert_eq!(monitor.phase(), Phase::Steady);

    // Cycle 2: P3 appears with liquidity.
    source.set_token(
        TokenProfile::new("solana", "TOKEN_B"),
        vec![pair("P3", "gamma", Some(5_000.0))],
    );
    let second = monitor.run_cycle().await;
    assert!(!second.bootstrap);
    assert_eq!(second.profiles, 2);
    assert_eq!(second.alerts_sent, 1);
    assert_eq!(second.tracked_pairs, 3);

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("<b>Token:</b> gamma ($GAMMA)"));
    assert!(sent[0].contains("<code>P3_MINT</code>"));
    assert!(sent[0].contains("<b>DEX:</b> Orca"));
    assert!(sent[0].contains("<b>Liquidity:</b> $5.0K"));
    assert!(sent[0].contains("<b>Price:</b> $1.25"));
    assert!(sent[0].contains("<a href='https://dexscreener.com/solana/P3'>DexScreener</a>"));

    // Further cycles with the same listing stay silent.
    for _ in 0..3 {
        let report = monitor.run_cycle().await;
        assert_eq!(report.alerts_sent, 0);
    }
    assert_eq!(sink.sent_count(), 1);
}

#[tokio::test]
async fn test_missing_liquidity_never_alerts() {
    let source = Arc::new(MockPairSource::new());
    let sink = Arc::new(MockAlertSink::new());
    let mut monitor = new_monitor(source.clone(), sink.clone());
    monitor.run_cycle().await;

    source.set_token(
        TokenProfile::new("solana", "TOKEN_C"),
        vec![pair("P4", "delta", None)],
    );
    monitor.run_cycle().await;

    source.set_token(
        TokenProfile::new("solana", "TOKEN_C"),
        vec![pair("P4", "delta", Some(75_000.0))],
    );
    let report = monitor.run_cycle().await;

    assert_eq!(report.alerts_sent, 0);
    assert_eq!(sink.sent_count(), 0);
    assert_eq!(monitor.tracked_pairs(), 1);
}

#[tokio::test]
async fn test_outage_then_recovery() {
    let source = Arc::new(MockPairSource::new());
    let sink = Arc::new(MockAlertSink::new());
    let mut monitor = new_monitor(source.clone(), sink.clone());

    source.set_token(
        TokenProfile::new("solana", "TOKEN_A"),
        vec![pair("P1", "alpha", Some(1_000.0))],
    );
    monitor.run_cycle().await;

    source.set_offline(true);
    let outage = monitor.run_cycle().await;
    assert_eq!(outage.profiles, 0);
    assert_eq!(outage.alerts_sent, 0);

    source.set_offline(false);
    source.set_token(
        TokenProfile::new("solana", "TOKEN_B"),
        vec![pair("P2", "beta", Some(600.0))],
    );
    let recovered = monitor.run_cycle().await;
    assert_eq!(recovered.alerts_sent, 1);
    assert_eq!(sink.sent_count(), 1);
}
