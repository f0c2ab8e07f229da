//! Telegram alerting for newly listed pairs.
//!
//! This crate provides:
//! - HTML alert formatting
//! - Telegram bot delivery
//! - The `AlertSink` seam used by the poll loop, with dry-run and mock sinks

pub mod format;
pub mod notifier;
pub mod telegram;

pub use format::{capitalize, format_number, short_address, AlertFormatter};
pub use notifier::{AlertSink, LogSink, MockAlertSink, NotifierError};
pub use telegram::{parse_recipient, TelegramBot, TelegramError};
