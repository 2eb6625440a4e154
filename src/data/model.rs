use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Borough – the closed set of recognised NYC boroughs
// ---------------------------------------------------------------------------

/// One of the five NYC boroughs recognised in `sublocality`.
///
/// Declaration order is also the match priority used by
/// [`Borough::extract`] when two names start at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Borough {
    Manhattan,
    Brooklyn,
    Queens,
    TheBronx,
    StatenIsland,
}

impl Borough {
    pub const ALL: [Borough; 5] = [
        Borough::Manhattan,
        Borough::Brooklyn,
        Borough::Queens,
        Borough::TheBronx,
        Borough::StatenIsland,
    ];

    /// The exact (case-sensitive) text searched for in `sublocality`.
    pub fn name(self) -> &'static str {
        match self {
            Borough::Manhattan => "Manhattan",
            Borough::Brooklyn => "Brooklyn",
            Borough::Queens => "Queens",
            Borough::TheBronx => "The Bronx",
            Borough::StatenIsland => "Staten Island",
        }
    }

    /// Find the leftmost borough name inside `text`.
    ///
    /// Matching is exact and case-sensitive; the first match wins.
    pub fn extract(text: &str) -> Option<Borough> {
        Borough::ALL
            .iter()
            .filter_map(|b| text.find(b.name()).map(|pos| (pos, *b)))
            .min_by_key(|&(pos, b)| (pos, b))
            .map(|(_, b)| b)
    }
}

impl fmt::Display for Borough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recognised borough")]
pub struct UnknownBorough(pub String);

impl FromStr for Borough {
    type Err = UnknownBorough;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Borough::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| UnknownBorough(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RawListing – one CSV record after header normalisation
// ---------------------------------------------------------------------------

/// A record as read from the CSV, before any derivation.
///
/// Every field is optional: empty cells and absent optional columns both
/// load as `None`. Serde field names are the lower-cased column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "na_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "na_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "na_number")]
    pub longitude: Option<f64>,
    pub sublocality: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "na_number")]
    pub propertysqft: Option<f64>,
    /// Present only when the file was written from an already-derived table.
    #[serde(default, deserialize_with = "na_number")]
    pub sqft: Option<f64>,
    /// Present only when the file was written from an already-derived table.
    pub borough: Option<String>,
}

/// Cell values read as missing, the same set pandas treats as NA by default.
pub const NA_TOKENS: [&str; 18] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "#N/A N/A", "#NA", "<NA>", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Numeric cell: surrounding whitespace is ignored, empty cells and
/// [`NA_TOKENS`] become `None`, anything else must parse as a float.
fn na_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = text.trim();
    if text.is_empty() || NA_TOKENS.contains(&text) {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("'{text}': {e}")))
}

/// The loader's output: normalised column names plus typed records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Lower-cased column names in file order.
    pub columns: Vec<String>,
    pub records: Vec<RawListing>,
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the cleaned table
// ---------------------------------------------------------------------------

/// A cleaned listing. Price, coordinates and borough are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub sublocality: String,
    pub borough: Borough,
    pub property_type: Option<String>,
    pub sqft: Option<f64>,
    /// `None` when `sqft` is missing or zero.
    pub price_per_sqft: Option<f64>,
}

impl Listing {
    /// Write the listing back out in raw form, derived columns included.
    pub fn to_raw(&self) -> RawListing {
        RawListing {
            price: Some(self.price),
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
            sublocality: Some(self.sublocality.clone()),
            property_type: self.property_type.clone(),
            propertysqft: self.sqft,
            sqft: self.sqft,
            borough: Some(self.borough.name().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the immutable cleaned table
// ---------------------------------------------------------------------------

/// The cleaned table: listings in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingTable {
    pub listings: Vec<Listing>,
}

impl ListingTable {
    pub fn new(listings: Vec<Listing>) -> Self {
        ListingTable { listings }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Convert back to a raw table so the cleaned data can be re-derived.
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            columns: [
                "price",
                "latitude",
                "longitude",
                "sublocality",
                "type",
                "propertysqft",
                "sqft",
                "borough",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            records: self.listings.iter().map(Listing::to_raw).collect(),
        }
    }
}
