//! Foreclosures reporting dashboard: CSV loading, filtering and aggregation.
//!
//! The `data` module is UI-independent; the `foreclosure-dashboard` binary
//! wraps it in an egui window.

pub mod config;
pub mod data;
