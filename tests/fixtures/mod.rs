//! Test fixtures for ride-nav.
//!
//! Provides realistic test data including:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap)
//! - Raw directions payload builders

pub mod las_vegas_locations;
pub mod payloads;
