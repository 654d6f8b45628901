use std::collections::HashMap;

use crate::error::{OutlookError, Result};

use super::model::{Dataset, OccupationRecord};

/// Rows shown per page in browse mode unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

// ---------------------------------------------------------------------------
// OccupationIndex – code lookup plus lower-cased search keys
// ---------------------------------------------------------------------------

/// Built once alongside the [`Dataset`]; positions refer to its sorted
/// record vector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OccupationIndex {
    by_code: HashMap<String, usize>,
    /// `(code, title)` lower-cased, one entry per record.
    keys: Vec<(String, String)>,
}

impl OccupationIndex {
    pub fn build(records: &[OccupationRecord]) -> Self {
        let by_code = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code.clone(), i))
            .collect();
        let keys = records
            .iter()
            .map(|r| (r.code.to_lowercase(), r.title.to_lowercase()))
            .collect();
        OccupationIndex { by_code, keys }
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    /// Positions of records whose code or title contains `query`, in
    /// record order. An empty (or all-whitespace) query matches everything.
    pub fn matches(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return (0..self.keys.len()).collect();
        }
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, (code, title))| code.contains(&needle) || title.contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Page – one slice of the browse list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Zero-based page number after clamping.
    pub index: usize,
    pub total_pages: usize,
    /// Position of the first record on this page.
    pub start: usize,
    /// One past the last record on this page.
    pub end: usize,
    pub total: usize,
    pub records: &'a [OccupationRecord],
}

// ---------------------------------------------------------------------------
// Search / browse over a dataset
// ---------------------------------------------------------------------------

impl Dataset {
    /// Case-insensitive substring search over SOC code and title.
    ///
    /// Results keep dataset order (ascending code); zero matches is an
    /// empty vector.
    pub fn search(&self, query: &str) -> Vec<&OccupationRecord> {
        let hits: Vec<&OccupationRecord> = self
            .index()
            .matches(query)
            .into_iter()
            .map(|i| &self.records()[i])
            .collect();
        log::debug!("search {query:?}: {} of {} occupations", hits.len(), self.len());
        hits
    }

    /// Return page `index` of the full dataset, clamping `index` to the last
    /// page. Only an empty dataset is an error.
    pub fn page(&self, index: usize, page_size: usize) -> Result<Page<'_>> {
        if self.is_empty() {
            return Err(OutlookError::OutOfRange { index });
        }
        let page_size = page_size.max(1);
        let total = self.len();
        let total_pages = total.div_ceil(page_size);
        let index = index.min(total_pages - 1);
        let start = index * page_size;
        let end = (start + page_size).min(total);
        Ok(Page {
            index,
            total_pages,
            start,
            end,
            total,
            records: &self.records()[start..end],
        })
    }
}
