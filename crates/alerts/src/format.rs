//! Alert message formatting.

use radar_core::{Chain, PairRecord};
use teloxide::utils::html;

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_SYMBOL: &str = "???";
const UNKNOWN_DEX: &str = "Unknown DEX";
const UNKNOWN_PRICE: &str = "N/A";

/// Format a USD amount with a magnitude suffix.
///
/// `1_500.0` becomes `$1.5K`, `2_500_000.0` becomes `$2.50M`.
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Elide the middle of a long address: `7xKX...AsU2`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Escape text for use inside a single- or double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    html::escape(value).replace('\'', "&#39;").replace('"', "&quot;")
}

/// Builds Telegram HTML alerts for newly discovered pairs.
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    chain: Chain,
    show_short_address: bool,
}

impl AlertFormatter {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            show_short_address: false,
        }
    }

    /// Append an elided copy of the token address after the full one.
    pub fn with_short_address(mut self, enabled: bool) -> Self {
        self.show_short_address = enabled;
        self
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// DexScreener chart link for a pair.
    pub fn chart_url(&self, pair_address: &str) -> String {
        format!("https://dexscreener.com/{}/{}", self.chain.slug(), pair_address)
    }

    /// Render the alert for `pair`.
    ///
    /// `origin_token` is the profiled token address the pair was discovered
    /// through; it stands in when the pair carries no base token address.
    pub fn format(&self, pair: &PairRecord, origin_token: Option<&str>) -> String {
        let name = html::escape(pair.token_name().unwrap_or(UNKNOWN_NAME));
        let symbol = html::escape(pair.token_symbol().unwrap_or(UNKNOWN_SYMBOL));
        let raw_address = pair.token_address().or(origin_token).unwrap_or_default();
        let token_address = html::escape(raw_address);
        let dex = match pair.dex() {
            Some(dex) => html::escape(&capitalize(dex)),
            None => UNKNOWN_DEX.to_string(),
        };
        let price = html::escape(pair.price().unwrap_or(UNKNOWN_PRICE));
        let chart = escape_attr(&self.chart_url(pair.address().unwrap_or_default()));

        let address_line = if self.show_short_address && !raw_address.is_empty() {
            format!(
                "<code>{}</code> ({})",
                token_address,
                html::escape(&short_address(raw_address))
            )
        } else {
            format!("<code>{}</code>", token_address)
        };

        format!(
            "🚨 <b>New Liquidity Added on {}!</b>\n\n\
             🪙 <b>Token:</b> {} (${})\n\
             📋 <b>Address:</b> {}\n\
             🏦 <b>DEX:</b> {}\n\
             💧 <b>Liquidity:</b> {}\n\
             💰 <b>Price:</b> ${}\n\
             🔗 <b>Chart:</b> <a href='{}'>DexScreener</a>",
            self.chain,
            name,
            symbol,
            address_line,
            dex,
            format_number(pair.liquidity_usd()),
            price,
            chart
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use radar_core::{BaseToken, Liquidity};

    fn sample_pair() -> PairRecord {
        PairRecord {
            pair_address: Some("PAIRxyz".to_string()),
            base_token: Some(BaseToken {
                name: Some("Dog Coin".to_string()),
                symbol: Some("DOG".to_string()),
                address: Some("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU".to_string()),
            }),
            dex_id: Some("raydium".to_string()),
            liquidity: Some(Liquidity { usd: Some(12_345.0) }),
            price_usd: Some("0.00042".to_string()),
        }
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(500.0), "$500.00");
        assert_eq!(format_number(1_500.0), "$1.5K");
        assert_eq!(format_number(2_500_000.0), "$2.50M");
        assert_eq!(format_number(0.0), "$0.00");
        assert_eq!(format_number(1_000.0), "$1.0K");
        assert_eq!(format_number(1_000_000.0), "$1.00M");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"),
            "7xKX...gAsU"
        );
        assert_eq!(short_address("SHORT"), "SHORT");
        assert_eq!(short_address(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("raydium"), "Raydium");
        assert_eq!(capitalize("pumpSWAP"), "Pumpswap");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_full_message() {
        let message = AlertFormatter::new(Chain::Solana).format(&sample_pair(), None);
        let expected = "🚨 <b>New Liquidity Added on Solana!</b>\n\n\
             🪙 <b>Token:</b> Dog Coin ($DOG)\n\
             📋 <b>Address:</b> <code>7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU</code>\n\
             🏦 <b>DEX:</b> Raydium\n\
             💧 <b>Liquidity:</b> $12.3K\n\
             💰 <b>Price:</b> $0.00042\n\
             🔗 <b>Chart:</b> <a href='https://dexscreener.com/solana/PAIRxyz'>DexScreener</a>";
        assert_eq!(message, expected);
    }

    #[test]
    fn test_short_address_variant() {
        let message = AlertFormatter::new(Chain::Solana)
            .with_short_address(true)
            .format(&sample_pair(), None);
        assert!(message.contains(
            "<code>7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU</code> (7xKX...gAsU)"
        ));
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let pair = PairRecord {
            pair_address: Some("P1".to_string()),
            ..Default::default()
        };
        let message = AlertFormatter::new(Chain::Solana).format(&pair, Some("ORIGIN_MINT"));

        assert!(message.contains("<b>Token:</b> Unknown ($???)"));
        assert!(message.contains("<b>DEX:</b> Unknown DEX"));
        assert!(message.contains("<b>Liquidity:</b> $0.00"));
        assert!(message.contains("<b>Price:</b> $N/A"));
        assert!(message.contains("<code>ORIGIN_MINT</code>"));
    }

    #[test]
    fn test_missing_name_only() {
        let mut pair = sample_pair();
        if let Some(token) = pair.base_token.as_mut() {
            token.name = None;
        }
        let message = AlertFormatter::new(Chain::Solana).format(&pair, None);
        assert!(message.contains("<b>Token:</b> Unknown ($DOG)"));
    }

    #[test]
    fn test_html_in_token_name_is_escaped() {
        let mut pair = sample_pair();
        if let Some(token) = pair.base_token.as_mut() {
            token.name = Some("<b>Rug & Pull</b>".to_string());
        }
        let message = AlertFormatter::new(Chain::Solana).format(&pair, None);
        assert!(message.contains("&lt;b&gt;Rug &amp; Pull&lt;/b&gt;"));
    }

    #[test]
    fn test_markup_in_addresses_is_escaped() {
        let pair = PairRecord {
            pair_address: Some("P'<x>&y".to_string()),
            base_token: Some(BaseToken {
                address: Some("MINT<&>".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let message = AlertFormatter::new(Chain::Solana).format(&pair, None);

        assert!(message.contains("<code>MINT&lt;&amp;&gt;</code>"));
        assert!(message.contains(
            "<a href='https://dexscreener.com/solana/P&#39;&lt;x&gt;&amp;y'>DexScreener</a>"
        ));
    }

    #[test]
    fn test_chart_url_uses_chain_slug() {
        let formatter = AlertFormatter::new(Chain::Bsc);
        assert_eq!(formatter.chart_url("0xpair"), "https://dexscreener.com/bsc/0xpair");
        assert!(formatter
            .format(&sample_pair(), None)
            .starts_with("🚨 <b>New Liquidity Added on BSC!</b>"));
    }
}
