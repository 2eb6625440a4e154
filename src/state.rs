use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::data::cache::TableCache;
use crate::data::filter::{filter, price_bounds, BoroughFilter, WorkingSubset};
use crate::data::model::ListingTable;

// ---------------------------------------------------------------------------
// Page selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Data,
    Charts,
    Map,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Data, Page::Charts, Page::Map];

    pub fn label(self) -> &'static str {
        match self {
            Page::Data => "Data",
            Page::Charts => "Charts",
            Page::Map => "Map",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Cleaned tables already loaded this run.
    cache: TableCache,

    /// Cleaned table being explored (None until a file loads).
    pub dataset: Option<Arc<ListingTable>>,

    /// File the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// Observed (min, max) price of the dataset, the slider range.
    pub price_range: (f64, f64),

    /// Inclusive price ceiling.
    pub max_price: f64,

    pub borough: BoroughFilter,

    pub page: Page,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: TableCache::new(),
            dataset: None,
            source_path: None,
            price_range: (0.0, 0.0),
            max_price: 0.0,
            borough: BoroughFilter::All,
            page: Page::Data,
            status_message: None,
        }
    }

    /// Load (or fetch from cache) the cleaned table at `path`.
    ///
    /// On failure the previous dataset is dropped so no stale view remains.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let loaded = self
            .cache
            .get_or_load(path)
            .with_context(|| format!("loading {}", path.display()));

        let table = match loaded {
            Ok(table) => table,
            Err(e) => {
                self.clear_dataset();
                self.status_message = Some(format!("Error: {e:#}"));
                return Err(e);
            }
        };

        if table.is_empty() {
            self.clear_dataset();
            let msg = format!(
                "No listings with a price, coordinates and a recognised borough in {}",
                path.display()
            );
            log::warn!("{msg}");
            self.status_message = Some(msg);
            return Ok(());
        }

        log::info!("Showing {} listings from {}", table.len(), path.display());
        self.source_path = Some(path.to_path_buf());
        self.set_dataset(table);
        Ok(())
    }

    /// Ingest a cleaned table and reset the filters to show everything.
    pub fn set_dataset(&mut self, dataset: Arc<ListingTable>) {
        self.price_range = price_bounds(&dataset).unwrap_or((0.0, 0.0));
        self.max_price = self.price_range.1;
        self.borough = BoroughFilter::All;
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    fn clear_dataset(&mut self) {
        self.dataset = None;
        self.source_path = None;
        self.price_range = (0.0, 0.0);
        self.max_price = 0.0;
        self.borough = BoroughFilter::All;
    }

    /// The working subset for the current filter selections.
    pub fn subset(&self) -> Option<WorkingSubset<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| filter(ds, self.max_price, self.borough))
    }

    pub fn set_max_price(&mut self, max_price: f64) {
        let (lo, hi) = self.price_range;
        self.max_price = max_price.clamp(lo, hi);
        log::debug!("Max price set to {}", self.max_price);
    }

    pub fn set_borough(&mut self, borough: BoroughFilter) {
        self.borough = borough;
        log::debug!("Borough filter set to {borough}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Borough;
    use tempfile::NamedTempFile;

    const CSV: &str = "PRICE,LATITUDE,LONGITUDE,SUBLOCALITY,TYPE\n\
        100,40.7,-73.9,Queens,House\n\
        500,40.8,-73.9,\"Manhattan, NY\",Condo\n\
        300,40.6,-74.1,Staten Island,House\n";

    fn csv_file(body: &str) -> NamedTempFile {
        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn test_open_sets_full_range() {
        let tmp = csv_file(CSV);
        let mut state = AppState::new(Settings::default());
        state.open_path(tmp.path()).unwrap();
        assert_eq!(state.price_range, (100.0, 500.0));
        assert_eq!(state.max_price, 500.0);
        assert_eq!(state.subset().unwrap().len(), 3);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_filters_narrow_subset() {
        let tmp = csv_file(CSV);
        let mut state = AppState::new(Settings::default());
        state.open_path(tmp.path()).unwrap();

        state.set_max_price(300.0);
        assert_eq!(state.subset().unwrap().len(), 2);

        state.set_borough(BoroughFilter::Only(Borough::Queens));
        let prices = state.subset().unwrap().prices();
        assert_eq!(prices, vec![100.0]);

        state.set_max_price(10_000.0);
        assert_eq!(state.max_price, 500.0);
    }

    #[test]
    fn test_missing_file_clears_dataset() {
        let tmp = csv_file(CSV);
        let mut state = AppState::new(Settings::default());
        state.open_path(tmp.path()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = state.open_path(&dir.path().join("gone.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("File not found"));
        assert!(state.dataset.is_none());
        assert!(state.subset().is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_table_with_no_admitted_rows() {
        let tmp = csv_file(
            "price,latitude,longitude,sublocality,type\n100,40.7,-73.9,Unknown Place,House\n",
        );
        let mut state = AppState::new(Settings::default());
        state.open_path(tmp.path()).unwrap();
        assert!(state.dataset.is_none());
        assert!(state.status_message.is_some());
    }
}
