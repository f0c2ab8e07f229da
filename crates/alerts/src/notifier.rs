//! Alert sinks: where formatted messages go.

use crate::telegram::{TelegramBot, TelegramError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),
    #[error("Alert rejected: {0}")]
    Rejected(String),
}

/// Destination for alert messages. Delivery is attempted once; callers
/// decide what to do with a failure.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, message: &str) -> Result<(), NotifierError>;
}

#[async_trait]
impl AlertSink for TelegramBot {
    async fn send(&self, message: &str) -> Result<(), NotifierError> {
        self.send_alert(message).await?;
        Ok(())
    }
}

/// Dry-run sink: writes alerts to the log instead of delivering them.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl AlertSink for LogSink {
    async fn send(&self, message: &str) -> Result<(), NotifierError> {
        info!("[dry-run] alert:\n{}", message);
        Ok(())
    }
}

/// Recording sink for tests.
#[derive(Default)]
pub struct MockAlertSink {
    sent: Mutex<Vec<String>>,
    /// Reject every message when set.
    pub should_fail: AtomicBool,
}

impl MockAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: AtomicBool::new(true),
            ..Default::default()
        }
    }

    /// Messages delivered so far.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AlertSink for MockAlertSink {
    async fn send(&self, message: &str) -> Result<(), NotifierError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotifierError::Rejected("mock failure".to_string()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.to_string());
        }
        Ok(())
    }
}
