use super::model::{Borough, Listing, ListingTable, RawListing, RawTable};

/// Row counts from one derivation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub missing_price: usize,
    pub missing_coordinates: usize,
    pub no_borough: usize,
}

impl DeriveReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

/// Where `sqft` comes from for the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqftSource {
    PropertySqft,
    Sqft,
    Absent,
}

/// Derive borough, sqft and price-per-sqft, then drop incomplete rows.
///
/// Output keeps the source row order. Rows lacking a finite price,
/// latitude, longitude or a recognised borough are dropped; a row drops
/// for the first missing field in that order.
pub fn derive(raw: &RawTable) -> (ListingTable, DeriveReport) {
    let sqft_source = if raw.has_column("propertysqft") {
        SqftSource::PropertySqft
    } else if raw.has_column("sqft") {
        SqftSource::Sqft
    } else {
        SqftSource::Absent
    };

    let mut report = DeriveReport {
        rows_read: raw.len(),
        ..Default::default()
    };

    let listings: Vec<Listing> = raw
        .records
        .iter()
        .filter_map(|rec| match admit(rec, sqft_source) {
            Ok(listing) => Some(listing),
            Err(reason) => {
                match reason {
                    Rejection::Price => report.missing_price += 1,
                    Rejection::Coordinates => report.missing_coordinates += 1,
                    Rejection::Borough => report.no_borough += 1,
                }
                None
            }
        })
        .collect();

    report.rows_kept = listings.len();
    log::info!(
        "Derived {} listings from {} rows ({} without price, {} without coordinates, {} outside the five boroughs)",
        report.rows_kept,
        report.rows_read,
        report.missing_price,
        report.missing_coordinates,
        report.no_borough
    );

    (ListingTable::new(listings), report)
}

enum Rejection {
    Price,
    Coordinates,
    Borough,
}

fn admit(rec: &RawListing, sqft_source: SqftSource) -> Result<Listing, Rejection> {
    let price = finite(rec.price).ok_or(Rejection::Price)?;
    let (latitude, longitude) = finite(rec.latitude)
        .zip(finite(rec.longitude))
        .ok_or(Rejection::Coordinates)?;
    let sublocality = rec.sublocality.clone().unwrap_or_default();
    let borough = Borough::extract(&sublocality).ok_or(Rejection::Borough)?;

    let sqft = match sqft_source {
        SqftSource::PropertySqft => finite(rec.propertysqft),
        SqftSource::Sqft => finite(rec.sqft),
        SqftSource::Absent => None,
    };

    Ok(Listing {
        price,
        latitude,
        longitude,
        sublocality,
        borough,
        property_type: rec.property_type.clone(),
        sqft,
        price_per_sqft: price_per_sqft(price, sqft),
    })
}

/// `price / sqft`, or `None` when sqft is missing or zero.
pub fn price_per_sqft(price: f64, sqft: Option<f64>) -> Option<f64> {
    sqft.filter(|s| *s != 0.0).map(|s| price / s)
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use std::path::Path;

    fn raw(text: &str) -> RawTable {
        read_csv(text.as_bytes(), Path::new("test.csv")).unwrap()
    }

    const SAMPLE: &str = "price,latitude,longitude,sublocality,type,propertysqft\n\
        315000,40.76,-73.98,Manhattan,Condo for sale,1400\n\
        195000,40.54,-74.15,\"Staten Island, NY\",House for sale,0\n\
        260000,40.70,-73.90,Unknown Place,House for sale,1200\n\
        ,40.68,-73.94,Brooklyn,Co-op for sale,800\n\
        425000,,-73.87,The Bronx,House for sale,2000\n\
        550000,40.72,-73.80,Kings County Queens,Townhouse for sale,\n";

    #[test]
    fn test_row_admission() {
        let (table, report) = derive(&raw(SAMPLE));
        let prices: Vec<f64> = table.listings.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![315000.0, 195000.0, 550000.0]);
        assert_eq!(report.rows_read, 6);
        assert_eq!(report.rows_kept, 3);
        assert_eq!(report.no_borough, 1);
        assert_eq!(report.missing_price, 1);
        assert_eq!(report.missing_coordinates, 1);
        assert_eq!(report.rows_dropped(), 3);
    }

    #[test]
    fn test_borough_derivation() {
        let (table, _) = derive(&raw(SAMPLE));
        let boroughs: Vec<Borough> = table.listings.iter().map(|l| l.borough).collect();
        assert_eq!(
            boroughs,
            vec![Borough::Manhattan, Borough::StatenIsland, Borough::Queens]
        );
        for l in &table.listings {
            assert!(Borough::ALL.contains(&l.borough));
            assert!(l.price.is_finite());
            assert!(l.latitude.is_finite() && l.longitude.is_finite());
        }
    }

    #[test]
    fn test_price_per_sqft() {
        let (table, _) = derive(&raw(SAMPLE));
        assert_eq!(table.listings[0].sqft, Some(1400.0));
        assert_eq!(table.listings[0].price_per_sqft, Some(225.0));
        // zero sqft: undefined, row still kept
        assert_eq!(table.listings[1].sqft, Some(0.0));
        assert_eq!(table.listings[1].price_per_sqft, None);
        // missing sqft
        assert_eq!(table.listings[2].sqft, None);
        assert_eq!(table.listings[2].price_per_sqft, None);
    }

    #[test]
    fn test_without_propertysqft_column() {
        let (table, _) = derive(&raw(
            "price,latitude,longitude,sublocality,type\n\
             100,40.7,-73.9,Queens,House\n",
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table.listings[0].sqft, None);
        assert_eq!(table.listings[0].price_per_sqft, None);
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let (table, report) = derive(&raw(
            "price,latitude,longitude,sublocality,type\n\
             NaN,40.7,-73.9,Queens,House\n\
             100,40.7,inf,Queens,House\n",
        ));
        assert!(table.is_empty());
        assert_eq!(report.missing_price, 1);
        assert_eq!(report.missing_coordinates, 1);
    }

    #[test]
    fn test_na_price_row_is_dropped() {
        let (table, report) = derive(&raw(
            "price,latitude,longitude,sublocality,type,propertysqft\n\
             NA,40.7,-73.9,Queens,House,900\n\
             200,40.8,-73.8,Manhattan,Condo,N/A\n\
             300,null,-73.8,Brooklyn,Condo,500\n",
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table.listings[0].price, 200.0);
        assert_eq!(table.listings[0].sqft, None);
        assert_eq!(report.missing_price, 1);
        assert_eq!(report.missing_coordinates, 1);
    }

    #[test]
    fn test_rederive_is_noop() {
        let (once, _) = derive(&raw(SAMPLE));
        let (twice, report) = derive(&once.to_raw());
        assert_eq!(once, twice);
        assert_eq!(report.rows_dropped(), 0);
    }

    #[test]
    fn test_rederive_through_csv_is_noop() {
        let (once, _) = derive(&raw(SAMPLE));
        let mut writer = csv::Writer::from_writer(Vec::new());
        for rec in &once.to_raw().records {
            writer.serialize(rec).unwrap();
        }
        let bytes = writer.into_inner().unwrap();
        let reloaded = read_csv(bytes.as_slice(), Path::new("derived.csv")).unwrap();
        assert!(reloaded.has_column("borough"));
        let (twice, _) = derive(&reloaded);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sqft_column_used_without_propertysqft() {
        let (table, _) = derive(&raw(
            "price,latitude,longitude,sublocality,type,sqft\n\
             1000,40.7,-73.9,Queens,House,500\n",
        ));
        assert_eq!(table.listings[0].sqft, Some(500.0));
        assert_eq!(table.listings[0].price_per_sqft, Some(2.0));
    }

    #[test]
    fn test_deterministic() {
        let input = raw(SAMPLE);
        assert_eq!(derive(&input), derive(&input));
    }

    #[test]
    fn test_empty_input() {
        let (table, report) = derive(&RawTable::default());
        assert!(table.is_empty());
        assert_eq!(report, DeriveReport::default());
    }
}
