use thiserror::Error;

/// Every failure the data layer can surface to the user.
#[derive(Error, Debug)]
pub enum OutlookError {
    /// Input spreadsheet is present but malformed.
    #[error("Malformed data file: {0}")]
    Schema(String),

    #[error("Data files not found: missing {}{}", .missing.join(" and "), available_suffix(.available))]
    DataFilesNotFound {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("Occupation not found: {0}")]
    NotFound(String),

    #[error("Page {index} requested but the dataset is empty")]
    OutOfRange { index: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

fn available_suffix(available: &[String]) -> String {
    if available.is_empty() {
        " (no spreadsheet files in the data directory)".to_string()
    } else {
        format!(" (found: {})", available.join(", "))
    }
}

impl OutlookError {
    /// Load-time failures: the dataset cannot be used until the files are
    /// fixed. The loader reports unreadable files as `Schema`; a bare `Io`
    /// or `Csv` error (a failed export, say) is recoverable in place.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            OutlookError::Schema(_)
                | OutlookError::DataFilesNotFound { .. }
                | OutlookError::XlsxRead(_)
                | OutlookError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OutlookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_message_lists_what_was_found() {
        let err = OutlookError::DataFilesNotFound {
            missing: vec!["CDF file".into(), "PDF file".into()],
            available: vec!["notes.xlsx".into()],
        };
        assert_eq!(
            err.to_string(),
            "Data files not found: missing CDF file and PDF file (found: notes.xlsx)"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn selection_errors_are_recoverable() {
        assert!(!OutlookError::NotFound("15-1252".into()).is_fatal());
        assert!(!OutlookError::OutOfRange { index: 3 }.is_fatal());
        assert!(OutlookError::Schema("bad header".into()).is_fatal());
    }
}
