use crate::error::{OutlookError, Result};

use super::model::{Dataset, OccupationRecord, TimeSeries};

/// Both series for one requested occupation, borrowed from the dataset.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBundle<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub cdf: &'a TimeSeries,
    pub pdf: &'a TimeSeries,
}

/// Result of [`extract`]: one bundle per distinct code, in request order.
#[derive(Debug, Clone, Default)]
pub struct Extraction<'a> {
    bundles: Vec<SeriesBundle<'a>>,
}

impl<'a> Extraction<'a> {
    pub fn get(&self, code: &str) -> Option<&SeriesBundle<'a>> {
        self.bundles.iter().find(|b| b.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesBundle<'a>> {
        self.bundles.iter()
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Look up the records for `codes`, dropping repeats. Fails on the first
/// code the dataset does not contain.
pub fn records_for<'a, S: AsRef<str>>(
    dataset: &'a Dataset,
    codes: &[S],
) -> Result<Vec<&'a OccupationRecord>> {
    let mut out: Vec<&OccupationRecord> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.as_ref();
        let record = dataset
            .get(code)
            .ok_or_else(|| OutlookError::NotFound(code.to_string()))?;
        if !out.iter().any(|r| r.code == record.code) {
            out.push(record);
        }
    }
    Ok(out)
}

/// Slice the CDF and PDF series for `codes`.
pub fn extract<'a, S: AsRef<str>>(dataset: &'a Dataset, codes: &[S]) -> Result<Extraction<'a>> {
    let bundles = records_for(dataset, codes)?
        .into_iter()
        .map(|r| SeriesBundle {
            code: &r.code,
            title: &r.title,
            cdf: &r.cdf,
            pdf: &r.pdf,
        })
        .collect();
    Ok(Extraction { bundles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SeriesKind;

    fn dataset() -> Dataset {
        let cdf_years = vec![2017, 2018, 2019];
        let pdf_years = vec![2018, 2019];
        let record = |code: &str, cdf: [f64; 3]| OccupationRecord {
            code: code.to_string(),
            title: format!("Occupation {code}"),
            cdf: TimeSeries::new(cdf_years.clone(), cdf.to_vec()),
            pdf: TimeSeries::new(pdf_years.clone(), vec![cdf[1] - cdf[0], cdf[2] - cdf[1]]),
        };
        Dataset::from_records(
            vec![record("11-1011", [0.0, 0.1, 0.3]), record("15-1252", [0.01, 0.02, 0.5])],
            cdf_years.clone(),
            pdf_years.clone(),
        )
    }

    #[test]
    fn extract_keeps_request_order_and_year_ranges() {
        let ds = dataset();
        let ex = extract(&ds, &["15-1252", "11-1011"]).unwrap();
        let codes: Vec<&str> = ex.iter().map(|b| b.code).collect();
        assert_eq!(codes, ["15-1252", "11-1011"]);

        for bundle in ex.iter() {
            assert_eq!(bundle.cdf.years, ds.years(SeriesKind::Cdf));
            assert_eq!(bundle.pdf.years, ds.years(SeriesKind::Pdf));
        }
        assert_eq!(ex.get("11-1011").unwrap().cdf.value_at(2019), Some(0.3));
    }

    #[test]
    fn duplicate_codes_collapse() {
        let ds = dataset();
        let ex = extract(&ds, &["11-1011", "11-1011"]).unwrap();
        assert_eq!(ex.len(), 1);
    }

    #[test]
    fn first_missing_code_is_reported() {
        let ds = dataset();
        let err = extract(&ds, &["11-1011", "99-0001", "99-0002"]).unwrap_err();
        assert!(matches!(err, OutlookError::NotFound(ref code) if code == "99-0001"));
    }

    #[test]
    fn empty_request_is_empty_extraction() {
        let ds = dataset();
        let none: [&str; 0] = [];
        assert!(extract(&ds, &none).unwrap().is_empty());
    }
}
