//! Startup settings read from the environment.
//!
//! - `HOUSING_DATA_PATH`: CSV loaded when the window opens.
//!   Default: `NY-House-Dataset.csv` in the working directory.
//!
//! - `HOUSING_HISTOGRAM_BINS`: number of buckets in the price histogram.
//!   Default: 30.
//!
//! - `HOUSING_OTHER_THRESHOLD`: share below which a property type is folded
//!   into "Other" in the type breakdown. Default: 0.05.
//!
//! - `HOUSING_RANK_SIZE`: rows shown in the most/least expensive tables.
//!   Default: 5.
//!
//! Values that fail to parse or are out of range are ignored with a warning.

use std::path::PathBuf;

use crate::data::aggregate::{DEFAULT_BINS, DEFAULT_OTHER_THRESHOLD};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const DEFAULT_DATA_PATH: &str = "NY-House-Dataset.csv";
const DEFAULT_RANK_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub histogram_bins: usize,
    pub other_threshold: f64,
    pub rank_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            histogram_bins: DEFAULT_BINS,
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            rank_size: DEFAULT_RANK_SIZE,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, starting from the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(val) = lookup("HOUSING_DATA_PATH") {
            if !val.trim().is_empty() {
                settings.data_path = PathBuf::from(val.trim());
            }
        }
        if let Some(n) = parse_setting(&lookup, "HOUSING_HISTOGRAM_BINS", |n: &usize| *n > 0) {
            settings.histogram_bins = n;
        }
        if let Some(t) = parse_setting(&lookup, "HOUSING_OTHER_THRESHOLD", |t: &f64| {
            (0.0..=1.0).contains(t)
        }) {
            settings.other_threshold = t;
        }
        if let Some(n) = parse_setting(&lookup, "HOUSING_RANK_SIZE", |n: &usize| *n > 0) {
            settings.rank_size = n;
        }

        settings
    }
}

fn parse_setting<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => Some(v),
        _ => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
