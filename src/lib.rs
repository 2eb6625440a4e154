//! Data pipeline behind the NY housing explorer: CSV loading, derived
//! columns, filtering and the summaries the dashboard pages display.

pub mod config;
pub mod data;
