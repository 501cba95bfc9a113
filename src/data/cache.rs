//! Memoized dataset loading.
//!
//! The burden table is loaded once per process and shared read-only; the
//! only invalidation is an explicit [`DatasetCache::clear`] (or restart).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::debug;

use super::loader::load_csv;
use super::model::TbDataset;

/// Loads the CSV on first access and hands out shared references after.
///
/// Sessions hold their own [`FilterCriteria`](super::filter::FilterCriteria);
/// the dataset itself is immutable, so one `Arc<TbDataset>` serves them all.
pub struct DatasetCache {
    path: PathBuf,
    cached: Mutex<Option<Arc<TbDataset>>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// The dataset, loading it if this is the first access.
    pub fn get(&self) -> Result<Arc<TbDataset>> {
        let mut slot = self.cached.lock().expect("dataset cache poisoned");
        if let Some(dataset) = slot.as_ref() {
            debug!("dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(load_csv(&self.path)?);
        *slot = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset; the next `get` reloads from disk.
    pub fn clear(&self) {
        *self.cached.lock().expect("dataset cache poisoned") = None;
    }
}
