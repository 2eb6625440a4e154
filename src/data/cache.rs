use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::derive::derive;
use super::loader::{self, LoadError};
use super::model::ListingTable;

/// Cleaned tables memoised by file path.
///
/// An entry is written on the first successful load of a path and never
/// invalidated; failed loads are not remembered.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<PathBuf, Arc<ListingTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cleaned table for `path`, loading and deriving it on a miss.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ListingTable>, LoadError> {
        let key = cache_key(path);
        if let Some(table) = self.tables.get(&key) {
            log::debug!("Cache hit for {}", key.display());
            return Ok(Arc::clone(table));
        }

        log::debug!("Cache miss for {}", key.display());
        let raw = loader::load(path)?;
        let (table, report) = derive(&raw);
        if report.rows_dropped() > 0 {
            log::debug!(
                "Dropped {} of {} rows from {}",
                report.rows_dropped(),
                report.rows_read,
                key.display()
            );
        }
        let table = Arc::new(table);
        self.tables.insert(key, Arc::clone(&table));
        log::debug!("Cache now holds {} table(s)", self.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Canonical path when it resolves, otherwise the path as given.
fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
