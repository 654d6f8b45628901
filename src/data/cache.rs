use std::sync::{Arc, OnceLock};

use crate::error::Result;

use super::discover::DataFiles;
use super::loader::load_dataset;
use super::model::Dataset;

/// Holds the dataset once it has been loaded.
///
/// Initialised at most once and read-only afterwards; there is no teardown
/// beyond process exit. A failed load leaves the cache empty so the caller
/// can retry after fixing the files.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceLock<Arc<Dataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        DatasetCache {
            cell: OnceLock::new(),
        }
    }

    /// The process-wide instance used by the application.
    pub fn global() -> &'static DatasetCache {
        static GLOBAL: DatasetCache = DatasetCache::new();
        &GLOBAL
    }

    /// Return the cached dataset, loading it from `files` on first use.
    ///
    /// Once something is cached, `files` is ignored.
    pub fn get_or_load(&self, files: &DataFiles) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            log::debug!("Dataset cache hit ({} occupations)", dataset.len());
            return Ok(Arc::clone(dataset));
        }
        let loaded = Arc::new(load_dataset(files)?);
        // Two racing first loads both succeed; only one result is kept.
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
