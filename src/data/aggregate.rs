//! Read-only summaries over a [`WorkingSubset`].
//!
//! Every operation that is undefined on an empty subset (mean, median,
//! histogram range, centroid) returns `None` instead of a NaN, so the
//! presentation layer can show a notice rather than garbage numbers.

use std::collections::HashMap;

use super::filter::WorkingSubset;
use super::model::{Borough, Listing};

/// Label of the synthetic bucket for rare property types.
pub const OTHER_CATEGORY: &str = "Other";
/// Label used for listings without a property type.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

pub const DEFAULT_BINS: usize = 30;
pub const DEFAULT_OTHER_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// The `n` cheapest (ascending) or most expensive (descending) listings.
///
/// Sorting is stable, so equal prices keep table order.
pub fn rank_by_price<'a>(subset: &WorkingSubset<'a>, n: usize, order: Order) -> Vec<&'a Listing> {
    let mut rows: Vec<&Listing> = subset.rows().collect();
    match order {
        Order::Ascending => rows.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Order::Descending => rows.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    pub mean: f64,
    pub median: f64,
    pub count: usize,
}

/// Mean, median and count of prices; `None` for an empty subset.
pub fn price_stats(subset: &WorkingSubset<'_>) -> Option<PriceStats> {
    let mut prices = subset.prices();
    let mean = mean(&prices)?;
    prices.sort_by(f64::total_cmp);
    let mid = prices.len() / 2;
    let median = if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    };
    Some(PriceStats {
        mean,
        median,
        count: prices.len(),
    })
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bucket counts. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Centre of bucket `i`, used as the bar position when plotting.
    pub fn bin_center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }
}

/// Bucket `values` into `bins` equal-width bins spanning their min/max.
///
/// Bins are half-open `[lo, hi)` except the last, which also includes the
/// maximum. When every value is equal the range becomes
/// `value - 0.5 ..= value + 0.5`. Returns `None` for no values or no bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 || values.is_empty() {
        return None;
    }
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);

    let last = bins - 1;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = (((v - lo) / width) as usize).min(last);
        // Float division can land one bucket off right at an edge.
        if idx > 0 && v < edges[idx] {
            idx -= 1;
        } else if idx < last && v >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

/// Mean price per borough, ascending by mean.
pub fn mean_by_group(subset: &WorkingSubset<'_>) -> Vec<(Borough, f64)> {
    let mut sums: HashMap<Borough, (f64, usize)> = HashMap::new();
    for l in subset.rows() {
        let entry = sums.entry(l.borough).or_insert((0.0, 0));
        entry.0 += l.price;
        entry.1 += 1;
    }
    let mut means: Vec<(Borough, f64)> = sums
        .into_iter()
        .map(|(b, (sum, n))| (b, sum / n as f64))
        .collect();
    means.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    means
}

// ---------------------------------------------------------------------------
// Category breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Count listings per property type, folding rare types into "Other".
///
/// A type whose share of the subset is strictly below `threshold` goes to
/// the "Other" bucket, which is appended last when non-empty. Kept types
/// are ordered by descending count, ties by first appearance. The counts
/// always sum to the subset length.
pub fn category_breakdown(subset: &WorkingSubset<'_>, threshold: f64) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for l in subset.rows() {
        let label = l.property_type.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        match position.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                position.insert(label, counts.len());
                counts.push(CategoryCount {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    let total = subset.len() as f64;
    let (mut kept, rare): (Vec<_>, Vec<_>) = counts
        .into_iter()
        .partition(|c| c.count as f64 / total >= threshold);

    let other: usize = rare.iter().map(|c| c.count).sum();
    if other > 0 {
        // A real "Other" type absorbs the rare ones instead of being shadowed.
        match kept.iter_mut().find(|c| c.label == OTHER_CATEGORY) {
            Some(existing) => existing.count += other,
            None => kept.push(CategoryCount {
                label: OTHER_CATEGORY.to_string(),
                count: other,
            }),
        }
    }
    kept
}

// ---------------------------------------------------------------------------
// Map centre
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub latitude: f64,
    pub longitude: f64,
}

/// Mean latitude/longitude of the subset; `None` when empty.
pub fn centroid(subset: &WorkingSubset<'_>) -> Option<Centroid> {
    let lats: Vec<f64> = subset.rows().map(|l| l.latitude).collect();
    let lons: Vec<f64> = subset.rows().map(|l| l.longitude).collect();
    Some(Centroid {
        latitude: mean(&lats)?,
        longitude: mean(&lons)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, BoroughFilter};
    use crate::data::model::ListingTable;

    fn listing(price: f64, borough: Borough, kind: Option<&str>) -> Listing {
        Listing {
            price,
            latitude: 40.0 + price / 1000.0,
            longitude: -74.0 + price / 1000.0,
            sublocality: borough.name().to_string(),
            borough,
            property_type: kind.map(str::to_string),
            sqft: None,
            price_per_sqft: None,
        }
    }

    fn ten_distinct() -> ListingTable {
        ListingTable::new(
            [700.0, 100.0, 900.0, 300.0, 500.0, 200.0, 1000.0, 400.0, 800.0, 600.0]
                .iter()
                .map(|&p| listing(p, Borough::Brooklyn, Some("House")))
                .collect(),
        )
    }

    #[test]
    fn test_rank_top_and_bottom_disjoint() {
        let t = ten_distinct();
        let subset = WorkingSubset::all(&t);
        let top: Vec<f64> = rank_by_price(&subset, 5, Order::Descending)
            .iter()
            .map(|l| l.price)
            .collect();
        let bottom: Vec<f64> = rank_by_price(&subset, 5, Order::Ascending)
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(top, vec![1000.0, 900.0, 800.0, 700.0, 600.0]);
        assert_eq!(bottom, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
        assert!(top.iter().all(|p| !bottom.contains(p)));
    }

    #[test]
    fn test_rank_is_stable_and_truncates() {
        let t = ListingTable::new(vec![
            listing(300.0, Borough::Queens, Some("a")),
            listing(300.0, Borough::Brooklyn, Some("b")),
            listing(100.0, Borough::Manhattan, Some("c")),
        ]);
        let subset = WorkingSubset::all(&t);
        let desc = rank_by_price(&subset, 2, Order::Descending);
        assert_eq!(desc.len(), 2);
        assert_eq!(desc[0].borough, Borough::Queens);
        assert_eq!(desc[1].borough, Borough::Brooklyn);
        let asc = rank_by_price(&subset, 10, Order::Ascending);
        assert_eq!(asc.len(), 3);
        assert_eq!(asc[1].borough, Borough::Queens);
    }

    #[test]
    fn test_price_stats() {
        let t = ten_distinct();
        let stats = price_stats(&WorkingSubset::all(&t)).unwrap();
        assert_eq!(stats.count, 10);
        assert!((stats.mean - 550.0).abs() < 1e-9);
        assert!((stats.median - 550.0).abs() < 1e-9);

        let odd = ListingTable::new(vec![
            listing(10.0, Borough::Queens, None),
            listing(1000.0, Borough::Queens, None),
            listing(20.0, Borough::Queens, None),
        ]);
        let stats = price_stats(&WorkingSubset::all(&odd)).unwrap();
        assert_eq!(stats.median, 20.0);
    }

    #[test]
    fn test_empty_subset_has_no_stats() {
        let t = ten_distinct();
        let empty = filter(&t, 0.0, BoroughFilter::All);
        assert!(price_stats(&empty).is_none());
        assert!(centroid(&empty).is_none());
        assert!(histogram(&empty.prices(), DEFAULT_BINS).is_none());
        assert!(mean_by_group(&empty).is_empty());
        assert!(category_breakdown(&empty, DEFAULT_OTHER_THRESHOLD).is_empty());
        assert!(rank_by_price(&empty, 5, Order::Ascending).is_empty());
    }

    #[test]
    fn test_histogram_three_values_three_bins() {
        let h = histogram(&[10.0, 20.0, 30.0], 3).unwrap();
        assert_eq!(h.counts, vec![1, 1, 1]);
        assert_eq!(h.total(), 3);
        assert_eq!(h.edges.len(), 4);
        assert_eq!(h.edges[0], 10.0);
        assert_eq!(h.edges[3], 30.0);
    }

    #[test]
    fn test_histogram_edges_follow_subset() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 5).unwrap();
        // 4.0 sits on the last inner edge, 5.0 is the closed upper bound.
        assert_eq!(h.counts, vec![1, 1, 1, 1, 2]);
        let h = histogram(&[100.0, 200.0], DEFAULT_BINS).unwrap();
        assert_eq!(h.counts.len(), DEFAULT_BINS);
        assert_eq!(h.edges[0], 100.0);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[DEFAULT_BINS - 1], 1);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_histogram_single_value() {
        let h = histogram(&[42.0, 42.0], 4).unwrap();
        assert_eq!(h.edges.first(), Some(&41.5));
        assert_eq!(h.edges.last(), Some(&42.5));
        assert_eq!(h.total(), 2);
        assert!(histogram(&[1.0], 0).is_none());
    }

    #[test]
    fn test_mean_by_group_sorted_ascending() {
        let t = ListingTable::new(vec![
            listing(900.0, Borough::Manhattan, None),
            listing(100.0, Borough::Queens, None),
            listing(300.0, Borough::Queens, None),
            listing(400.0, Borough::Brooklyn, None),
            listing(1100.0, Borough::Manhattan, None),
        ]);
        let means = mean_by_group(&WorkingSubset::all(&t));
        assert_eq!(
            means,
            vec![
                (Borough::Queens, 200.0),
                (Borough::Brooklyn, 400.0),
                (Borough::Manhattan, 1000.0)
            ]
        );
    }

    #[test]
    fn test_category_breakdown_merges_rare_types() {
        let mut rows = Vec::new();
        for _ in 0..12 {
            rows.push(listing(1.0, Borough::Queens, Some("House for sale")));
        }
        for _ in 0..6 {
            rows.push(listing(1.0, Borough::Queens, Some("Condo for sale")));
        }
        // 1 of 20 is exactly 5%: kept.
        rows.push(listing(1.0, Borough::Queens, Some("Co-op for sale")));
        rows.push(listing(1.0, Borough::Queens, None));
        let t = ListingTable::new(rows);
        let breakdown = category_breakdown(&WorkingSubset::all(&t), 0.05);
        let labels: Vec<&str> = breakdown.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["House for sale", "Condo for sale", "Co-op for sale", "Unknown"]
        );

        let breakdown = category_breakdown(&WorkingSubset::all(&t), 0.1);
        assert_eq!(
            breakdown.last(),
            Some(&CategoryCount {
                label: OTHER_CATEGORY.to_string(),
                count: 2
            })
        );
        assert_eq!(breakdown.iter().map(|c| c.count).sum::<usize>(), t.len());
    }

    #[test]
    fn test_category_breakdown_existing_other() {
        let mut rows = vec![listing(1.0, Borough::Queens, Some("Other")); 5];
        rows.extend(vec![listing(1.0, Borough::Queens, Some("House")); 14]);
        rows.push(listing(1.0, Borough::Queens, Some("Mobile house for sale")));
        let t = ListingTable::new(rows);
        let breakdown = category_breakdown(&WorkingSubset::all(&t), 0.1);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[1].label, "Other");
        assert_eq!(breakdown[1].count, 6);
        assert_eq!(breakdown.iter().map(|c| c.count).sum::<usize>(), 20);
    }

    #[test]
    fn test_centroid() {
        let t = ListingTable::new(vec![
            listing(0.0, Borough::Queens, None),
            listing(1000.0, Borough::Queens, None),
        ]);
        let c = centroid(&WorkingSubset::all(&t)).unwrap();
        assert!((c.latitude - 40.5).abs() < 1e-9);
        assert!((c.longitude - -73.5).abs() < 1e-9);
    }
}
