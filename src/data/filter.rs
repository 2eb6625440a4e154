use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::model::{Borough, Listing, ListingTable, UnknownBorough};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// Label used by the borough selector for "no borough filter".
pub const ALL_BOROUGHS: &str = "All";

/// Borough selection: everything, or exactly one borough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoroughFilter {
    #[default]
    All,
    Only(Borough),
}

impl BoroughFilter {
    fn matches(self, borough: Borough) -> bool {
        match self {
            BoroughFilter::All => true,
            BoroughFilter::Only(selected) => selected == borough,
        }
    }
}

impl fmt::Display for BoroughFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoroughFilter::All => f.write_str(ALL_BOROUGHS),
            BoroughFilter::Only(b) => write!(f, "{b}"),
        }
    }
}

impl FromStr for BoroughFilter {
    type Err = UnknownBorough;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_BOROUGHS {
            Ok(BoroughFilter::All)
        } else {
            s.parse().map(BoroughFilter::Only)
        }
    }
}

// ---------------------------------------------------------------------------
// WorkingSubset – a filtered view over the cleaned table
// ---------------------------------------------------------------------------

/// Rows of a [`ListingTable`] that passed the current filters.
///
/// Borrows the table; indices are in table order.
#[derive(Debug, Clone)]
pub struct WorkingSubset<'a> {
    table: &'a ListingTable,
    indices: Vec<usize>,
}

impl<'a> WorkingSubset<'a> {
    /// A view over every row of `table`.
    pub fn all(table: &'a ListingTable) -> Self {
        WorkingSubset {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate the selected listings in table order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.listings[i])
    }

    pub fn prices(&self) -> Vec<f64> {
        self.rows().map(|l| l.price).collect()
    }
}

/// Apply the price ceiling (inclusive) and the borough selection.
pub fn filter(table: &ListingTable, max_price: f64, borough: BoroughFilter) -> WorkingSubset<'_> {
    let indices = table
        .listings
        .iter()
        .enumerate()
        .filter(|(_, l)| l.price <= max_price)
        .filter(|(_, l)| borough.matches(l.borough))
        .map(|(i, _)| i)
        .collect();
    WorkingSubset { table, indices }
}

/// Observed (min, max) price, for the price slider range.
pub fn price_bounds(table: &ListingTable) -> Option<(f64, f64)> {
    table.listings.iter().fold(None, |acc, l| match acc {
        None => Some((l.price, l.price)),
        Some((lo, hi)) => Some((lo.min(l.price), hi.max(l.price))),
    })
}

/// Boroughs that occur in the table, sorted by name.
pub fn boroughs_present(table: &ListingTable) -> Vec<Borough> {
    let present: BTreeSet<Borough> = table.listings.iter().map(|l| l.borough).collect();
    let mut boroughs: Vec<Borough> = present.into_iter().collect();
    boroughs.sort_by_key(|b| b.name());
    boroughs
}
