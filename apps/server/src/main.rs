//! Liquidity Radar - Headless Server
//!
//! Polls DexScreener for freshly listed pairs and posts alerts to Telegram.

mod config;

use clap::Parser;
use config::AppConfig;
use radar_alerts::{AlertFormatter, AlertSink, LogSink, TelegramBot};
use radar_engine::Monitor;
use radar_feeds::DexScreenerClient;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Liquidity Radar CLI
#[derive(Parser, Debug)]
#[command(name = "liquidity-radar")]
#[command(about = "Alerts on newly listed DEX pairs", long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seconds between poll cycles (overrides POLL_INTERVAL)
    #[arg(short, long)]
    poll_interval: Option<u64>,

    /// Log alerts instead of sending them to Telegram
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Include an elided token address next to the full one
    #[arg(long, default_value_t = false)]
    short_address: bool,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Build the alert sink. In live mode the bot token is verified via `getMe`.
async fn build_sink(config: &AppConfig) -> Option<Arc<dyn AlertSink>> {
    let Some(telegram) = config.telegram.as_ref() else {
        info!("📝 Dry run: alerts will be logged, not sent");
        return Some(Arc::new(LogSink));
    };

    let bot = TelegramBot::new(&telegram.bot_token, &telegram.channel_id);
    match bot.username().await {
        Ok(username) => info!("Bot started as @{}", username),
        Err(e) => {
            error!("Telegram rejected the bot token: {}", e);
            return None;
        }
    }
    Some(Arc::new(bot))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_logging(&args.log_level);

    let mut config = match AppConfig::from_env(args.dry_run) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(secs) = args.poll_interval {
        config.poll_interval = Duration::from_secs(secs);
    }

    info!("🚀 Liquidity Radar starting...");
    info!("  Chain: {}", config.chain);
    info!("  Provider: {}", config.base_url);
    info!("  Poll Interval: {}s", config.poll_interval.as_secs());
    info!("  Dry Run: {}", config.telegram.is_none());
    if let Some(telegram) = config.telegram.as_ref() {
        info!("  Channel: {}", telegram.channel_id);
    }

    let source = match DexScreenerClient::new(config.dexscreener()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create DexScreener client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(sink) = build_sink(&config).await else {
        return ExitCode::FAILURE;
    };

    let formatter = AlertFormatter::new(config.chain).with_short_address(args.short_address);
    let mut monitor = Monitor::new(source, sink, formatter, config.monitor());

    tokio::select! {
        _ = monitor.run() => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
            warn!("Shutdown signal received");
        }
    }

    info!(
        "👋 Liquidity Radar stopped ({} pairs tracked)",
        monitor.tracked_pairs()
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["liquidity-radar"]);
        assert_eq!(args.log_level, "info");
        assert_eq!(args.poll_interval, None);
        assert!(!args.dry_run);
        assert!(!args.short_address);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "liquidity-radar",
            "--poll-interval",
            "15",
            "--dry-run",
            "-l",
            "debug",
        ]);
        assert_eq!(args.poll_interval, Some(15));
        assert!(args.dry_run);
        assert_eq!(args.log_level, "debug");
    }

    #[tokio::test]
    async fn test_dry_run_sink_does_not_need_credentials() {
        let config = AppConfig::default();
        let sink = build_sink(&config).await.unwrap();
        assert!(sink.send("hello").await.is_ok());
    }
}
