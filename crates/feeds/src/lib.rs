//! Market-data collection for the liquidity radar.
//!
//! - `dexscreener` - REST client for the DexScreener public API
//! - `source` - `PairSource` trait consumed by the poll loop, plus a scripted mock
//! - `error` - `FeedError`

pub mod dexscreener;
pub mod error;
pub mod source;

pub use dexscreener::*;
pub use error::*;
pub use source::*;
