use std::fmt;

use super::index::OccupationIndex;

// ---------------------------------------------------------------------------
// SeriesKind – which of the two distributions a series belongs to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Cumulative probability that automation has happened by a given year.
    Cdf,
    /// Annual probability that automation happens in a given year.
    Pdf,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Cdf, SeriesKind::Pdf];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::Cdf => "CDF",
            SeriesKind::Pdf => "PDF",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            SeriesKind::Cdf => {
                "Cumulative Distribution Function (CDF) - Automation Probability Over Time"
            }
            SeriesKind::Pdf => {
                "Probability Density Function (PDF) - Annual Automation Probability"
            }
        }
    }

    pub fn y_axis_label(self) -> &'static str {
        match self {
            SeriesKind::Cdf => "Cumulative Probability",
            SeriesKind::Pdf => "Annual Probability",
        }
    }

    /// Stem used when naming exported files, e.g. `CDF_Data`.
    pub fn file_stem(self) -> &'static str {
        match self {
            SeriesKind::Cdf => "CDF_Data",
            SeriesKind::Pdf => "PDF_Data",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// TimeSeries – year-indexed values for one occupation
// ---------------------------------------------------------------------------

/// Ordered `(year, value)` pairs, stored as parallel vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    /// Consecutive ascending years.
    pub years: Vec<i32>,
    /// One value per year – same length as `years`.
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(years: Vec<i32>, values: Vec<f64>) -> Self {
        debug_assert_eq!(years.len(), values.len());
        TimeSeries { years, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Value for `year`, if the series covers it.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        let first = self.first_year()?;
        let offset = usize::try_from(year.checked_sub(first)?).ok()?;
        self.values.get(offset).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// OccupationRecord – one row shared by both input files
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct OccupationRecord {
    /// SOC code, e.g. `15-1252`.
    pub code: String,
    pub title: String,
    pub cdf: TimeSeries,
    pub pdf: TimeSeries,
}

impl OccupationRecord {
    pub fn series(&self, kind: SeriesKind) -> &TimeSeries {
        match kind {
            SeriesKind::Cdf => &self.cdf,
            SeriesKind::Pdf => &self.pdf,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded data, immutable after construction
// ---------------------------------------------------------------------------

/// All occupations from the CDF and PDF files, sorted by SOC code.
///
/// Only the loader can build one, after it has checked that both files
/// describe the same code set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<OccupationRecord>,
    cdf_years: Vec<i32>,
    pdf_years: Vec<i32>,
    index: OccupationIndex,
}

impl Dataset {
    /// Sort records by code and build the lookup index. Callers guarantee
    /// codes are unique.
    pub(crate) fn from_records(
        mut records: Vec<OccupationRecord>,
        cdf_years: Vec<i32>,
        pdf_years: Vec<i32>,
    ) -> Self {
        records.sort_by(|a, b| a.code.cmp(&b.code));
        let index = OccupationIndex::build(&records);
        Dataset {
            records,
            cdf_years,
            pdf_years,
            index,
        }
    }

    /// Number of occupations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in ascending code order.
    pub fn records(&self) -> &[OccupationRecord] {
        &self.records
    }

    pub fn get(&self, code: &str) -> Option<&OccupationRecord> {
        self.index.position(code).map(|i| &self.records[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.position(code).is_some()
    }

    /// Declared year range of the given series kind.
    pub fn years(&self, kind: SeriesKind) -> &[i32] {
        match kind {
            SeriesKind::Cdf => &self.cdf_years,
            SeriesKind::Pdf => &self.pdf_years,
        }
    }

    pub(crate) fn index(&self) -> &OccupationIndex {
        &self.index
    }
}
