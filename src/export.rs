use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use crate::data::{Dataset, OccupationRecord, SeriesKind};
use crate::error::{OutlookError, Result};
use crate::session::Session;

pub const CODE_HEADER: &str = "SOC";
pub const TITLE_HEADER: &str = "Title";
pub const SHEET_NAME: &str = "Data";

// ---------------------------------------------------------------------------
// Format / scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Button label, e.g. "CSV" / "Excel".
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

/// Whether an export covers every occupation or just the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Full,
    Selection,
}

/// Default download name, e.g. `CDF_Data.csv` or `Selected_PDF_Data.xlsx`.
pub fn file_name(scope: ExportScope, kind: SeriesKind, format: ExportFormat) -> String {
    let prefix = match scope {
        ExportScope::Full => "",
        ExportScope::Selection => "Selected_",
    };
    format!("{prefix}{}.{}", kind.file_stem(), format.extension())
}

// ---------------------------------------------------------------------------
// ExportTable – what gets written
// ---------------------------------------------------------------------------

/// Rows of one series kind, with the year columns to emit.
#[derive(Debug, Clone)]
pub struct ExportTable<'a> {
    pub kind: SeriesKind,
    pub years: &'a [i32],
    pub records: Vec<&'a OccupationRecord>,
}

impl<'a> ExportTable<'a> {
    /// Every occupation in the dataset.
    pub fn full(dataset: &'a Dataset, kind: SeriesKind) -> Self {
        ExportTable {
            kind,
            years: dataset.years(kind),
            records: dataset.records().iter().collect(),
        }
    }

    /// The session's selection, in selection order.
    pub fn selection(dataset: &'a Dataset, session: &Session, kind: SeriesKind) -> Result<Self> {
        Ok(ExportTable {
            kind,
            years: dataset.years(kind),
            records: session.selected_records(dataset)?,
        })
    }

    pub fn for_scope(
        dataset: &'a Dataset,
        session: &Session,
        scope: ExportScope,
        kind: SeriesKind,
    ) -> Result<Self> {
        match scope {
            ExportScope::Full => Ok(Self::full(dataset, kind)),
            ExportScope::Selection => Self::selection(dataset, session, kind),
        }
    }

    /// One value per header year; `None` where a record lacks the year.
    fn row_values(&self, record: &OccupationRecord) -> Vec<Option<f64>> {
        let series = record.series(self.kind);
        self.years.iter().map(|&y| series.value_at(y)).collect()
    }
}

// ---------------------------------------------------------------------------
// Encoders
// ---------------------------------------------------------------------------

/// Serialize `table` as `format`. Same input always yields the same bytes.
pub fn encode(table: &ExportTable<'_>, format: ExportFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Csv => encode_csv(table)?,
        ExportFormat::Xlsx => encode_xlsx(table)?,
    };
    log::debug!(
        "Encoded {} {} rows as {} ({} bytes)",
        table.records.len(),
        table.kind,
        format.label(),
        bytes.len()
    );
    Ok(bytes)
}

fn encode_csv(table: &ExportTable<'_>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec![CODE_HEADER.to_string(), TITLE_HEADER.to_string()];
    header.extend(table.years.iter().map(|y| y.to_string()));
    writer.write_record(&header)?;

    for record in &table.records {
        let mut row = vec![record.code.clone(), record.title.clone()];
        row.extend(
            table
                .row_values(record)
                .into_iter()
                .map(|v| v.map(format_value).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| OutlookError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

/// Shortest text that parses back to the same `f64`, padded to at least two
/// decimals (`0.8` → `0.80`). Non-finite values become empty cells.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let mut text = value.to_string();
    match text.find('.') {
        Some(dot) => {
            let decimals = text.len() - dot - 1;
            for _ in decimals..2 {
                text.push('0');
            }
        }
        None => text.push_str(".00"),
    }
    text
}

fn encode_xlsx(table: &ExportTable<'_>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    // Fixed creation date so repeated exports are byte-identical.
    let created = ExcelDateTime::from_ymd(2017, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    sheet.write_string_with_format(0, 0, CODE_HEADER, &bold)?;
    sheet.write_string_with_format(0, 1, TITLE_HEADER, &bold)?;
    for (i, year) in table.years.iter().enumerate() {
        sheet.write_number_with_format(0, xlsx_col(i + 2)?, f64::from(*year), &bold)?;
    }

    for (r, record) in table.records.iter().enumerate() {
        let row = u32::try_from(r + 1)
            .map_err(|_| OutlookError::Schema("too many rows for a worksheet".to_string()))?;
        sheet.write_string(row, 0, &record.code)?;
        sheet.write_string(row, 1, &record.title)?;
        for (i, value) in table.row_values(record).into_iter().enumerate() {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                sheet.write_number(row, xlsx_col(i + 2)?, v)?;
            }
        }
    }

    sheet.set_column_width(0, 10)?;
    sheet.set_column_width(1, 45)?;
    sheet.set_freeze_panes(1, 2)?;

    Ok(workbook.save_to_buffer()?)
}

fn xlsx_col(i: usize) -> Result<u16> {
    u16::try_from(i).map_err(|_| OutlookError::Schema("too many columns for a worksheet".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_keep_two_decimals_minimum() {
        assert_eq!(format_value(0.8), "0.80");
        assert_eq!(format_value(0.01), "0.01");
        assert_eq!(format_value(1.0), "1.00");
        assert_eq!(format_value(0.0), "0.00");
        assert_eq!(format_value(0.012345), "0.012345");
        assert_eq!(format_value(f64::NAN), "");
    }

    #[test]
    fn formatted_values_round_trip_exactly() {
        for v in [0.1 + 0.2, 1.0 / 3.0, 2.5e-9, 0.999_999_999_999_9, 0.8] {
            assert_eq!(format_value(v).parse::<f64>().unwrap(), v);
        }
    }

    #[test]
    fn file_names_follow_scope_kind_and_format() {
        assert_eq!(
            file_name(ExportScope::Full, SeriesKind::Cdf, ExportFormat::Csv),
            "CDF_Data.csv"
        );
        assert_eq!(
            file_name(ExportScope::Selection, SeriesKind::Pdf, ExportFormat::Xlsx),
            "Selected_PDF_Data.xlsx"
        );
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    }
}
