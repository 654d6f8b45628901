use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

const FIRST_YEAR: i32 = 2017;
const LAST_YEAR: i32 = 2086;

const OCCUPATIONS: [(&str, &str); 12] = [
    ("11-1011", "Chief Executives"),
    ("13-2011", "Accountants and Auditors"),
    ("15-1252", "Software Developers"),
    ("15-1253", "Software Quality Assurance Analysts and Testers"),
    ("25-2021", "Elementary School Teachers, Except Special Education"),
    ("29-1141", "Registered Nurses"),
    ("35-2014", "Cooks, Restaurant"),
    ("41-2011", "Cashiers"),
    ("43-4051", "Customer Service Representatives"),
    ("43-9021", "Data Entry Keyers"),
    ("47-2061", "Construction Laborers"),
    ("53-3032", "Heavy and Tractor-Trailer Truck Drivers"),
];

/// SplitMix64: enough randomness to vary the curves, same output every run.
struct SplitMix(u64);

impl SplitMix {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// Logistic CDF scaled to `ceiling`, rounded to 4 decimals so the PDF
/// below is an exact first difference of what gets written.
fn cdf_curve(midpoint: f64, steepness: f64, ceiling: f64) -> Vec<f64> {
    (FIRST_YEAR..=LAST_YEAR)
        .map(|year| {
            let t = f64::from(year) - midpoint;
            let v = ceiling / (1.0 + (-steepness * t).exp());
            (v * 10_000.0).round() / 10_000.0
        })
        .collect()
}

fn write_sheet(path: &Path, first_year: i32, rows: &[(&str, &str, Vec<f64>)]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "SOC")?;
    sheet.write_string(0, 1, "Title")?;
    for (i, year) in (first_year..=LAST_YEAR).enumerate() {
        sheet.write_number(0, (i + 2) as u16, f64::from(year))?;
    }

    for (r, (code, title, values)) in rows.iter().enumerate() {
        let row = (r + 1) as u32;
        sheet.write_string(row, 0, *code)?;
        sheet.write_string(row, 1, *title)?;
        for (i, v) in values.iter().enumerate() {
            sheet.write_number(row, (i + 2) as u16, *v)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SplitMix(42);

    let mut cdf_rows = Vec::with_capacity(OCCUPATIONS.len());
    let mut pdf_rows = Vec::with_capacity(OCCUPATIONS.len());
    for (code, title) in OCCUPATIONS {
        let midpoint = rng.range(2030.0, 2080.0);
        let steepness = rng.range(0.05, 0.25);
        let ceiling = rng.range(0.6, 0.99);

        let cdf = cdf_curve(midpoint, steepness, ceiling);
        let pdf: Vec<f64> = cdf
            .windows(2)
            .map(|w| ((w[1] - w[0]) * 10_000.0).round() / 10_000.0)
            .collect();

        cdf_rows.push((code, title, cdf));
        pdf_rows.push((code, title, pdf));
    }

    let cdf_path = out_dir.join("Probas CDFs.xlsx");
    let pdf_path = out_dir.join("Probas PDFs.xlsx");
    write_sheet(&cdf_path, FIRST_YEAR, &cdf_rows)?;
    write_sheet(&pdf_path, FIRST_YEAR + 1, &pdf_rows)?;

    println!(
        "Wrote {} occupations ({FIRST_YEAR}-{LAST_YEAR}) to {} and {}",
        OCCUPATIONS.len(),
        cdf_path.display(),
        pdf_path.display()
    );
    Ok(())
}
