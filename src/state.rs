use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use occupation_outlook::data::{DataFiles, Dataset, DatasetCache, SeriesKind};
use occupation_outlook::export::{self, ExportFormat, ExportScope, ExportTable};
use occupation_outlook::{Config, Session};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Browse,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Shared read-only dataset (None until the data files load).
    pub dataset: Option<Arc<Dataset>>,

    /// This window's session: selection, query, browse page.
    pub session: Session,

    pub tab: Tab,

    /// Codes matching `session.query` (cached).
    pub search_hits: Vec<String>,

    /// Colours for the selected occupations.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dataset: None,
            session: Session::new(),
            tab: Tab::default(),
            search_hits: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Discover and load the data files from `dir` through the process-wide
    /// cache. Failures are shown to the user; nothing is retried.
    pub fn load_from_dir(&mut self, dir: &Path) {
        let result =
            DataFiles::discover(dir).and_then(|files| DatasetCache::global().get_or_load(&files));

        match result {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                let prefix = if e.is_fatal() { "Cannot load data" } else { "Error" };
                let e = anyhow::Error::new(e)
                    .context(format!("loading data from {}", dir.display()));
                log::error!("Failed to load data files: {e:#}");
                self.push_status(format!("{prefix}: {e:#}"));
            }
        }
    }

    /// Add a message to the status line, keeping any earlier one.
    pub fn push_status(&mut self, msg: String) {
        self.status_message = Some(match self.status_message.take() {
            Some(prev) => format!("{prev} | {msg}"),
            None => msg,
        });
    }

    /// Ingest a loaded dataset and reset the session views.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.dataset = Some(dataset);
        self.session.page = 0;
        self.status_message = None;
        self.refilter();
        self.rebuild_color_map();
    }

    pub fn can_open_data(&self) -> bool {
        !DatasetCache::global().is_loaded()
    }

    /// Recompute `search_hits` after the query changes.
    pub fn refilter(&mut self) {
        self.search_hits = match &self.dataset {
            Some(ds) => ds
                .search(&self.session.query)
                .into_iter()
                .map(|r| r.code.clone())
                .collect(),
            None => Vec::new(),
        };
    }

    pub fn set_query(&mut self, query: String) {
        self.session.query = query;
        self.refilter();
    }

    fn rebuild_color_map(&mut self) {
        self.color_map = ColorMap::new(self.session.selection.list());
    }

    pub fn toggle_selected(&mut self, code: &str) {
        self.session.selection.toggle(code);
        self.rebuild_color_map();
    }

    pub fn remove_selected(&mut self, code: &str) {
        if self.session.selection.remove(code) {
            self.rebuild_color_map();
        }
    }

    pub fn clear_selection(&mut self) {
        self.session.selection.clear();
        self.rebuild_color_map();
    }

    /// Encode and write one export to `path`.
    pub fn export_to(
        &self,
        path: &Path,
        scope: ExportScope,
        kind: SeriesKind,
        format: ExportFormat,
    ) -> Result<()> {
        let dataset = self.dataset.as_ref().context("no dataset loaded")?;
        let table = ExportTable::for_scope(dataset, &self.session, scope, kind)?;
        let bytes = export::encode(&table, format)
            .with_context(|| format!("encoding {kind} data as {}", format.label()))?;
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!(
            "Exported {} {kind} rows to {} ({})",
            table.records.len(),
            path.display(),
            format.mime_type()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_dir_config(dir: &Path) -> Config {
        Config {
            data_dir: dir.join("missing"),
            ..Config::default()
        }
    }

    #[test]
    fn missing_folder_is_reported_as_data_files_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(missing_dir_config(dir.path()));
        state.load_from_dir(&dir.path().join("missing"));

        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Cannot load data: "), "{msg}");
        assert!(msg.contains("Data files not found"), "{msg}");
        assert!(state.dataset.is_none());
    }

    #[test]
    fn status_messages_accumulate() {
        let mut state = AppState::new(Config::default());
        state.push_status("Error: bad config".to_string());
        state.push_status("Cannot load data: nothing here".to_string());
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error: bad config | Cannot load data: nothing here")
        );
    }
}
