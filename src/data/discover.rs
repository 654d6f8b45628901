use std::path::{Path, PathBuf};

use crate::error::{OutlookError, Result};

use super::model::SeriesKind;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "ods", "csv"];

const CDF_NAMES: [&str; 5] = [
    "Probas CDFs.xlsx",
    "Probas_CDFs.xlsx",
    "probas cdfs.xlsx",
    "probas_cdfs.xlsx",
    "PROBAS CDFS.xlsx",
];

const PDF_NAMES: [&str; 5] = [
    "Probas PDFs.xlsx",
    "Probas_PDFs.xlsx",
    "probas pdfs.xlsx",
    "probas_pdfs.xlsx",
    "PROBAS PDFS.xlsx",
];

/// Locations of the two input spreadsheets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub cdf: PathBuf,
    pub pdf: PathBuf,
}

impl DataFiles {
    pub fn new(cdf: impl Into<PathBuf>, pdf: impl Into<PathBuf>) -> Self {
        DataFiles {
            cdf: cdf.into(),
            pdf: pdf.into(),
        }
    }

    /// Find the CDF and PDF files in `dir`.
    ///
    /// Well-known file names win; otherwise the first spreadsheet (sorted by
    /// name) whose name contains `cdf` / `pdf` is used.
    pub fn discover(dir: &Path) -> Result<DataFiles> {
        let available = match spreadsheet_files(dir) {
            Ok(names) => names,
            Err(OutlookError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Data directory {} does not exist", dir.display());
                return Err(OutlookError::DataFilesNotFound {
                    missing: vec!["CDF file".to_string(), "PDF file".to_string()],
                    available: Vec::new(),
                });
            }
            Err(e) => return Err(e),
        };

        let cdf = find(dir, SeriesKind::Cdf, &available);
        let pdf = find(dir, SeriesKind::Pdf, &available);

        match (cdf, pdf) {
            (Some(cdf), Some(pdf)) => {
                log::info!("Using CDF file {} and PDF file {}", cdf.display(), pdf.display());
                Ok(DataFiles { cdf, pdf })
            }
            (cdf, pdf) => {
                let mut missing = Vec::new();
                if cdf.is_none() {
                    missing.push("CDF file".to_string());
                }
                if pdf.is_none() {
                    missing.push("PDF file".to_string());
                }
                Err(OutlookError::DataFilesNotFound { missing, available })
            }
        }
    }
}

fn find(dir: &Path, kind: SeriesKind, available: &[String]) -> Option<PathBuf> {
    let (names, pattern) = match kind {
        SeriesKind::Cdf => (&CDF_NAMES, "cdf"),
        SeriesKind::Pdf => (&PDF_NAMES, "pdf"),
    };

    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
        .or_else(|| {
            available
                .iter()
                .find(|name| name.to_lowercase().contains(pattern))
                .map(|name| dir.join(name))
        })
}

/// Sorted file names in `dir` that look like spreadsheets. Matching on the
/// extension keeps stray `.pdf` documents out of the PDF fallback.
fn spreadsheet_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let is_spreadsheet = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_spreadsheet {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
