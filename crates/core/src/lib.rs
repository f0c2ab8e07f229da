//! Core data types for the liquidity radar.

pub mod chain;
pub mod pair;

pub use chain::*;
pub use pair::*;
