//! New-pair detection engine.
//!
//! Tracks which pairs have been seen and drives the poll loop that turns
//! first sightings into alerts.

pub mod monitor;
pub mod tracker;

pub use monitor::*;
pub use tracker::*;
