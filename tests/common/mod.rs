//! Fixtures for integration tests: small CDF / PDF spreadsheets written to
//! temporary directories.
#![allow(dead_code)]

use std::path::Path;

use occupation_outlook::data::DataFiles;
use rust_xlsxwriter::Workbook;

pub const FIRST_YEAR: i32 = 2017;
pub const LAST_YEAR: i32 = 2086;

pub struct Occupation {
    pub code: &'static str,
    pub title: &'static str,
    /// One value per year, FIRST_YEAR..=LAST_YEAR.
    pub cdf: Vec<f64>,
}

impl Occupation {
    /// First differences of the CDF, FIRST_YEAR + 1..=LAST_YEAR.
    pub fn pdf(&self) -> Vec<f64> {
        self.cdf.windows(2).map(|w| round4(w[1] - w[0])).collect()
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Straight line from `start` in FIRST_YEAR to `end` in LAST_YEAR.
pub fn linear_cdf(start: f64, end: f64) -> Vec<f64> {
    let span = f64::from(LAST_YEAR - FIRST_YEAR);
    (FIRST_YEAR..=LAST_YEAR)
        .map(|y| round4(start + (end - start) * f64::from(y - FIRST_YEAR) / span))
        .collect()
}

pub fn sample_occupations() -> Vec<Occupation> {
    vec![
        Occupation {
            code: "41-2011",
            title: "Cashiers",
            cdf: linear_cdf(0.05, 0.95),
        },
        Occupation {
            code: "15-1252",
            title: "Software Developers",
            cdf: linear_cdf(0.01, 0.80),
        },
        Occupation {
            code: "11-1011",
            title: "Chief Executives",
            cdf: linear_cdf(0.0, 0.3),
        },
        Occupation {
            code: "53-3032",
            title: "Heavy and Tractor-Trailer Truck Drivers",
            cdf: linear_cdf(0.02, 0.99),
        },
    ]
}

pub fn cdf_years() -> Vec<i32> {
    (FIRST_YEAR..=LAST_YEAR).collect()
}

pub fn pdf_years() -> Vec<i32> {
    (FIRST_YEAR + 1..=LAST_YEAR).collect()
}

fn write_xlsx(path: &Path, years: &[i32], rows: &[(&str, &str, Vec<f64>)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "SOC").unwrap();
    sheet.write_string(0, 1, "Title").unwrap();
    for (i, year) in years.iter().enumerate() {
        sheet.write_number(0, (i + 2) as u16, f64::from(*year)).unwrap();
    }
    for (r, (code, title, values)) in rows.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string(row, 0, *code).unwrap();
        sheet.write_string(row, 1, *title).unwrap();
        for (i, v) in values.iter().enumerate() {
            sheet.write_number(row, (i + 2) as u16, *v).unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn write_csv(path: &Path, years: &[i32], rows: &[(&str, &str, Vec<f64>)]) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    let mut header = vec!["SOC".to_string(), "Title".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    writer.write_record(&header).unwrap();
    for (code, title, values) in rows {
        let mut record = vec![code.to_string(), title.to_string()];
        record.extend(values.iter().map(|v| v.to_string()));
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
}

fn cdf_rows(occupations: &[Occupation]) -> Vec<(&str, &str, Vec<f64>)> {
    occupations
        .iter()
        .map(|o| (o.code, o.title, o.cdf.clone()))
        .collect()
}

fn pdf_rows(occupations: &[Occupation]) -> Vec<(&str, &str, Vec<f64>)> {
    occupations
        .iter()
        .map(|o| (o.code, o.title, o.pdf()))
        .collect()
}

/// Write `Probas CDFs.xlsx` / `Probas PDFs.xlsx` into `dir`.
pub fn write_xlsx_pair(dir: &Path, occupations: &[Occupation]) -> DataFiles {
    let files = DataFiles::new(dir.join("Probas CDFs.xlsx"), dir.join("Probas PDFs.xlsx"));
    write_xlsx(&files.cdf, &cdf_years(), &cdf_rows(occupations));
    write_xlsx(&files.pdf, &pdf_years(), &pdf_rows(occupations));
    files
}

/// Same content as [`write_xlsx_pair`], as CSV files.
pub fn write_csv_pair(dir: &Path, occupations: &[Occupation]) -> DataFiles {
    let files = DataFiles::new(dir.join("cdf_export.csv"), dir.join("pdf_export.csv"));
    write_csv(&files.cdf, &cdf_years(), &cdf_rows(occupations));
    write_csv(&files.pdf, &pdf_years(), &pdf_rows(occupations));
    files
}

/// Write a PDF workbook that only covers `occupations`, next to an
/// existing CDF file.
pub fn write_pdf_only(path: &Path, occupations: &[Occupation]) {
    write_xlsx(path, &pdf_years(), &pdf_rows(occupations));
}
