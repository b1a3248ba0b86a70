//! Test fixtures for ride-directions.
//!
//! Provides:
//! - Real Kochi (Kerala) road paths, as decoded coordinates
//! - Builders for directions API response bodies

pub mod kochi_routes;

pub use kochi_routes::*;
