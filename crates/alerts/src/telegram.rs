//! Telegram delivery.

use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, ParseMode, Recipient};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
}

/// Interpret a configured destination: numeric chat ids (e.g. `-100123`)
/// or channel usernames, with or without the leading `@`.
pub fn parse_recipient(channel: &str) -> Recipient {
    let channel = channel.trim();
    match channel.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) if channel.starts_with('@') => Recipient::ChannelUsername(channel.to_string()),
        Err(_) => Recipient::ChannelUsername(format!("@{}", channel)),
    }
}

/// Telegram bot bound to a single destination channel.
pub struct TelegramBot {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramBot {
    /// Create a new bot with the given token and destination.
    pub fn new(token: &str, channel: &str) -> Self {
        Self {
            bot: Bot::new(token),
            recipient: parse_recipient(channel),
        }
    }

    /// Username of the bot account, via `getMe`. Doubles as a token check.
    pub async fn username(&self) -> Result<String, TelegramError> {
        let me = self.bot.get_me().await?;
        Ok(me.user.username.clone().unwrap_or_default())
    }

    /// Send an HTML alert with link previews suppressed.
    pub async fn send_alert(&self, message: &str) -> Result<(), TelegramError> {
        self.bot
            .send_message(self.recipient.clone(), message)
            .parse_mode(ParseMode::Html)
            .link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_chat_id() {
        assert_eq!(
            parse_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        );
    }

    #[test]
    fn test_parse_channel_username() {
        assert_eq!(
            parse_recipient("@SolLiquidityRadar"),
            Recipient::ChannelUsername("@SolLiquidityRadar".to_string())
        );
        assert_eq!(
            parse_recipient(" SolLiquidityRadar "),
            Recipient::ChannelUsername("@SolLiquidityRadar".to_string())
        );
    }

    #[test]
    fn test_bot_keeps_recipient() {
        let bot = TelegramBot::new("123:abc", "@radar");
        assert_eq!(
            bot.recipient,
            Recipient::ChannelUsername("@radar".to_string())
        );
    }
}
