use std::fmt;

use super::model::{Dataset, OccupationRecord};

/// Allowed gap between a PDF value and the matching CDF difference.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A suspicious value in otherwise loadable data. Reported, never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    CdfOutOfBounds {
        code: String,
        year: i32,
        value: f64,
    },
    CdfDecreasing {
        code: String,
        year: i32,
        previous: f64,
        value: f64,
    },
    PdfMismatch {
        code: String,
        year: i32,
        pdf: f64,
        cdf_delta: f64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::CdfOutOfBounds { code, year, value } => {
                write!(f, "{code}: CDF {year} = {value} is outside [0, 1]")
            }
            ValidationIssue::CdfDecreasing {
                code,
                year,
                previous,
                value,
            } => write!(f, "{code}: CDF drops from {previous} to {value} in {year}"),
            ValidationIssue::PdfMismatch {
                code,
                year,
                pdf,
                cdf_delta,
            } => write!(
                f,
                "{code}: PDF {year} = {pdf} but CDF difference is {cdf_delta}"
            ),
        }
    }
}

/// Check every record: CDF within [0,1] and non-decreasing, PDF equal to
/// the year-over-year CDF difference within `tolerance`.
pub fn validate(dataset: &Dataset, tolerance: f64) -> Vec<ValidationIssue> {
    dataset
        .records()
        .iter()
        .flat_map(|r| validate_record(r, tolerance))
        .collect()
}

pub fn validate_record(record: &OccupationRecord, tolerance: f64) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let code = &record.code;

    for (year, value) in record.cdf.iter() {
        if !(-tolerance..=1.0 + tolerance).contains(&value) {
            issues.push(ValidationIssue::CdfOutOfBounds {
                code: code.clone(),
                year,
                value,
            });
        }
    }

    for pair in record.cdf.values.windows(2).zip(record.cdf.years.iter().skip(1)) {
        let (w, &year) = pair;
        if w[1] + tolerance < w[0] {
            issues.push(ValidationIssue::CdfDecreasing {
                code: code.clone(),
                year,
                previous: w[0],
                value: w[1],
            });
        }
    }

    for (year, pdf) in record.pdf.iter() {
        let (Some(current), Some(previous)) =
            (record.cdf.value_at(year), record.cdf.value_at(year - 1))
        else {
            continue;
        };
        let cdf_delta = current - previous;
        if (pdf - cdf_delta).abs() > tolerance {
            issues.push(ValidationIssue::PdfMismatch {
                code: code.clone(),
                year,
                pdf,
                cdf_delta,
            });
        }
    }

    issues
}
