//! Data layer: loading, derivation, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!   NY-House-Dataset.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse CSV, lower-case headers → RawTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  derive   │  borough, sqft, price/sqft, row admission → ListingTable
//!   └──────────┘        (memoised per path by `cache`)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  price ceiling + borough → WorkingSubset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  rankings, stats, histogram, group-by, breakdown, centroid
//!   └───────────┘
//! ```
pub mod aggregate;
pub mod cache;
pub mod derive;
pub mod filter;
pub mod loader;
pub mod model;
