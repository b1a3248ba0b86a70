//! ride-directions core
//!
//! Fetches alternative driving routes from a directions API, decodes their
//! polylines, and tracks which one the rider is previewing or has picked.

pub mod config;
pub mod directions;
pub mod error;
pub mod logging;
pub mod polyline;
pub mod route;
pub mod selection;
pub mod traits;
pub mod viewport;
