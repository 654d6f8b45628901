use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{OutlookError, Result};

use super::discover::DataFiles;
use super::model::{Dataset, OccupationRecord, SeriesKind, TimeSeries};
use super::validate::{self, DEFAULT_TOLERANCE};

/// How many validation issues are logged individually before summarising.
const MAX_LOGGED_ISSUES: usize = 10;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load both input files and join them into a [`Dataset`].
pub fn load_dataset(files: &DataFiles) -> Result<Dataset> {
    let cdf = load_table(&files.cdf, SeriesKind::Cdf)?;
    let pdf = load_table(&files.pdf, SeriesKind::Pdf)?;
    let dataset = build_dataset(cdf, pdf)?;

    log::info!(
        "Loaded {} occupations (CDF {}, PDF {})",
        dataset.len(),
        year_span(dataset.years(SeriesKind::Cdf)),
        year_span(dataset.years(SeriesKind::Pdf)),
    );

    let issues = validate::validate(&dataset, DEFAULT_TOLERANCE);
    for issue in issues.iter().take(MAX_LOGGED_ISSUES) {
        log::warn!("{issue}");
    }
    if issues.len() > MAX_LOGGED_ISSUES {
        log::warn!(
            "{} further validation issues not shown",
            issues.len() - MAX_LOGGED_ISSUES
        );
    }

    Ok(dataset)
}

/// Read one series file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet
/// * `.csv` – comma-separated, header row first
pub fn load_table(path: &Path, kind: SeriesKind) -> Result<SeriesTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path),
        "csv" => read_csv(path),
        other => {
            return Err(OutlookError::Schema(format!(
                "{}: unsupported file extension .{other}",
                path.display()
            )))
        }
    }
    .map_err(|e| unreadable(path, e))?;

    parse_table(kind, rows).map_err(|e| match e {
        OutlookError::Schema(msg) => OutlookError::Schema(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// A file that exists but cannot be decoded is malformed input.
fn unreadable(path: &Path, err: OutlookError) -> OutlookError {
    match err {
        OutlookError::Io(e) => {
            OutlookError::Schema(format!("{}: cannot be read: {e}", path.display()))
        }
        OutlookError::Csv(e) => {
            OutlookError::Schema(format!("{}: cannot be read: {e}", path.display()))
        }
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Parsed sheet
// ---------------------------------------------------------------------------

/// One input file after header and value parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTable {
    pub kind: SeriesKind,
    pub years: Vec<i32>,
    pub rows: Vec<SeriesRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub code: String,
    pub title: String,
    /// One value per entry in [`SeriesTable::years`].
    pub values: Vec<f64>,
}

/// A raw spreadsheet cell before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", *v as i64),
            Cell::Number(v) => v.to_string(),
        }
    }

    fn as_year(&self) -> Option<i32> {
        let v = self.as_number()?;
        if v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 {
            return None;
        }
        Some(v as i32)
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            OutlookError::Schema(format!("{}: workbook contains no sheets", path.display()))
        })??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        other => Cell::Text(format!("{other:?}")),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Schema checks
// ---------------------------------------------------------------------------

/// Interpret raw rows: row 0 is the header (code, title, years…), every
/// further non-blank row is one occupation.
pub(crate) fn parse_table(kind: SeriesKind, rows: Vec<Vec<Cell>>) -> Result<SeriesTable> {
    let mut rows = rows.into_iter();
    let mut header = rows
        .next()
        .ok_or_else(|| OutlookError::Schema(format!("{kind} file is empty")))?;
    while header.last().is_some_and(Cell::is_blank) {
        header.pop();
    }

    if header.len() < 3 {
        return Err(OutlookError::Schema(format!(
            "{kind} file needs SOC code, title and at least one year column, found {} column(s)",
            header.len()
        )));
    }

    let years = header[2..]
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.as_year().ok_or_else(|| {
                OutlookError::Schema(format!(
                    "{kind} column {} header {:?} is not a year",
                    i + 3,
                    cell.as_text()
                ))
            })
        })
        .collect::<Result<Vec<i32>>>()?;

    if let Some(pair) = years.windows(2).find(|w| w[0].checked_add(1) != Some(w[1])) {
        return Err(OutlookError::Schema(format!(
            "{kind} year headers must be consecutive, found {} followed by {}",
            pair[0], pair[1]
        )));
    }

    let mut seen = BTreeSet::new();
    let mut parsed = Vec::new();

    // Spreadsheet row numbers are 1-based and the header is row 1.
    for (offset, row) in rows.enumerate() {
        let line = offset + 2;
        if row.iter().all(Cell::is_blank) {
            continue;
        }

        let code = row.first().map(Cell::as_text).unwrap_or_default();
        if code.is_empty() {
            return Err(OutlookError::Schema(format!(
                "{kind} row {line}: missing SOC code"
            )));
        }
        if !seen.insert(code.clone()) {
            return Err(OutlookError::Schema(format!(
                "{kind} row {line}: duplicate SOC code {code}"
            )));
        }
        let title = row.get(1).map(Cell::as_text).unwrap_or_default();

        let values = years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let cell = row.get(i + 2).unwrap_or(&Cell::Empty);
                match cell.as_number() {
                    Some(v) if v.is_finite() => Ok(v),
                    _ => Err(OutlookError::Schema(format!(
                        "{kind} row {line} ({code}), year {year}: {:?} is not a number",
                        cell.as_text()
                    ))),
                }
            })
            .collect::<Result<Vec<f64>>>()?;

        parsed.push(SeriesRow {
            code,
            title,
            values,
        });
    }

    Ok(SeriesTable {
        kind,
        years,
        rows: parsed,
    })
}

/// Join the CDF and PDF tables on SOC code.
///
/// The PDF range must start one year after the CDF range and end on the
/// same year, and both files must list exactly the same codes.
pub fn build_dataset(cdf: SeriesTable, pdf: SeriesTable) -> Result<Dataset> {
    let cdf_first = cdf.years.first().copied();
    let expected_pdf = (
        cdf_first.and_then(|y| y.checked_add(1)),
        cdf.years.last().copied(),
    );
    let actual_pdf = (pdf.years.first().copied(), pdf.years.last().copied());
    if expected_pdf != actual_pdf {
        return Err(OutlookError::Schema(format!(
            "PDF years {} do not follow CDF years {} (expected the CDF range minus its first year)",
            year_span(&pdf.years),
            year_span(&cdf.years)
        )));
    }

    let cdf_codes: BTreeSet<&str> = cdf.rows.iter().map(|r| r.code.as_str()).collect();
    let pdf_codes: BTreeSet<&str> = pdf.rows.iter().map(|r| r.code.as_str()).collect();
    if cdf_codes != pdf_codes {
        let only_cdf: Vec<&str> = cdf_codes.difference(&pdf_codes).copied().collect();
        let only_pdf: Vec<&str> = pdf_codes.difference(&cdf_codes).copied().collect();
        return Err(OutlookError::Schema(format!(
            "CDF and PDF files list different occupations ({} rows vs {}); missing from PDF: {}; missing from CDF: {}",
            cdf.rows.len(),
            pdf.rows.len(),
            sample_codes(&only_cdf),
            sample_codes(&only_pdf)
        )));
    }

    let mut pdf_rows: HashMap<String, SeriesRow> = pdf
        .rows
        .into_iter()
        .map(|r| (r.code.clone(), r))
        .collect();

    let mut records = Vec::with_capacity(cdf.rows.len());
    for row in cdf.rows {
        let Some(pdf_row) = pdf_rows.remove(&row.code) else {
            continue;
        };
        if pdf_row.title != row.title {
            log::warn!(
                "Title mismatch for {}: CDF {:?}, PDF {:?}; using the CDF title",
                row.code,
                row.title,
                pdf_row.title
            );
        }
        records.push(OccupationRecord {
            cdf: TimeSeries::new(cdf.years.clone(), row.values),
            pdf: TimeSeries::new(pdf.years.clone(), pdf_row.values),
            code: row.code,
            title: row.title,
        });
    }

    Ok(Dataset::from_records(records, cdf.years, pdf.years))
}

fn sample_codes(codes: &[&str]) -> String {
    const SHOWN: usize = 5;
    if codes.is_empty() {
        return "none".to_string();
    }
    let mut out = codes[..codes.len().min(SHOWN)].join(", ");
    if codes.len() > SHOWN {
        out.push_str(&format!(" and {} more", codes.len() - SHOWN));
    }
    out
}

pub fn year_span(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "(no years)".to_string(),
    }
}
