//! Application configuration.
//!
//! Read from the process environment (after `.env` is loaded) and adjusted by
//! command-line flags.

use radar_core::Chain;
use radar_engine::MonitorConfig;
use radar_feeds::DexScreenerConfig;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("unsupported chain {0:?}")]
    UnknownChain(String),
}

/// Telegram credentials and destination.
#[derive(Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub channel_id: String,
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("bot_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` only in dry-run mode.
    pub telegram: Option<TelegramSettings>,
    pub chain: Chain,
    pub base_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub alert_pause: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let monitor = MonitorConfig::default();
        Self {
            telegram: None,
            chain: Chain::Solana,
            base_url: DexScreenerConfig::DEFAULT_BASE_URL.to_string(),
            request_timeout: DexScreenerConfig::DEFAULT_TIMEOUT,
            poll_interval: monitor.poll_interval,
            alert_pause: monitor.alert_pause,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env(dry_run: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), dry_run)
    }

    /// Load using `lookup` to resolve variables. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F, dry_run: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let telegram = match (get("BOT_TOKEN"), get("CHANNEL_ID")) {
            (Some(bot_token), Some(channel_id)) => Some(TelegramSettings {
                bot_token,
                channel_id,
            }),
            _ if dry_run => None,
            (None, _) => return Err(ConfigError::Missing("BOT_TOKEN")),
            (_, None) => return Err(ConfigError::Missing("CHANNEL_ID")),
        };

        let chain = match get("MONITORED_CHAIN") {
            Some(value) => value
                .parse::<Chain>()
                .map_err(|_| ConfigError::UnknownChain(value))?,
            None => defaults.chain,
        };

        let poll_interval = match get("POLL_INTERVAL") {
            Some(value) => Duration::from_secs(parse_number("POLL_INTERVAL", &value)?),
            None => defaults.poll_interval,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", &value)?),
            None => defaults.request_timeout,
        };

        let alert_pause = match get("ALERT_PAUSE_MS") {
            Some(value) => Duration::from_millis(parse_number("ALERT_PAUSE_MS", &value)?),
            None => defaults.alert_pause,
        };

        Ok(Self {
            telegram,
            chain,
            base_url: get("DEXSCREENER_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout,
            poll_interval,
            alert_pause,
        })
    }

    pub fn dexscreener(&self) -> DexScreenerConfig {
        DexScreenerConfig {
            base_url: self.base_url.clone(),
            chain: self.chain,
            request_timeout: self.request_timeout,
        }
    }

    pub fn monitor(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: self.poll_interval,
            alert_pause: self.alert_pause,
        }
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}
