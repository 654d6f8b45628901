//! Search → select → export, starting from spreadsheets on disk.

mod common;

use occupation_outlook::data::{DataFiles, DatasetCache, SeriesKind};
use occupation_outlook::export::{encode, ExportFormat, ExportTable};
use occupation_outlook::Session;

#[test]
fn software_developers_selection_exports_one_csv_row() {
    let dir = tempfile::tempdir().unwrap();
    let written = common::write_xlsx_pair(dir.path(), &common::sample_occupations());

    let files = DataFiles::discover(dir.path()).unwrap();
    assert_eq!(files, written);

    let cache = DatasetCache::new();
    let dataset = cache.get_or_load(&files).unwrap();

    assert!(dataset.search("1525").is_empty());

    let hits = dataset.search("software");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "15-1252");
    assert_eq!(hits[0].title, "Software Developers");

    let mut session = Session::new();
    assert!(session.selection.add(&hits[0].code));

    let table = ExportTable::selection(&dataset, &session, SeriesKind::Cdf).unwrap();
    let csv = String::from_utf8(encode(&table, ExportFormat::Csv).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2, "{csv}");

    let mut header = vec!["SOC".to_string(), "Title".to_string()];
    header.extend((2017..=2086).map(|y| y.to_string()));
    assert_eq!(lines[0], header.join(","));

    assert!(lines[1].starts_with("15-1252,Software Developers,0.01,"), "{}", lines[1]);
    assert!(lines[1].ends_with(",0.80"), "{}", lines[1]);
    assert_eq!(lines[1].split(',').count(), 2 + 70);
}

#[test]
fn removing_the_only_selection_exports_just_the_header() {
    let dir = tempfile::tempdir().unwrap();
    let files = common::write_xlsx_pair(dir.path(), &common::sample_occupations());
    let dataset = DatasetCache::new().get_or_load(&files).unwrap();

    let mut session = Session::new();
    session.selection.add("15-1252");
    session.selection.remove("15-1252");
    assert!(session.selection.is_empty());

    let table = ExportTable::selection(&dataset, &session, SeriesKind::Pdf).unwrap();
    let csv = String::from_utf8(encode(&table, ExportFormat::Csv).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("SOC,Title,2018,"));
}

#[test]
fn stale_selection_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let files = common::write_xlsx_pair(dir.path(), &common::sample_occupations());
    let dataset = DatasetCache::new().get_or_load(&files).unwrap();

    let mut session = Session::new();
    session.selection.add("15-1252");
    session.selection.add("99-9999");

    let err = session.selected_series(&dataset).unwrap_err();
    assert!(err.to_string().contains("99-9999"));
    assert!(!err.is_fatal());
}

#[test]
fn browse_pages_cover_every_occupation_once() {
    let dir = tempfile::tempdir().unwrap();
    let files = common::write_xlsx_pair(dir.path(), &common::sample_occupations());
    let dataset = DatasetCache::new().get_or_load(&files).unwrap();

    let first = dataset.page(0, 3).unwrap();
    assert_eq!(first.total_pages, 2);
    let mut codes: Vec<&str> = first.records.iter().map(|r| r.code.as_str()).collect();
    codes.extend(dataset.page(1, 3).unwrap().records.iter().map(|r| r.code.as_str()));
    assert_eq!(codes, ["11-1011", "15-1252", "41-2011", "53-3032"]);
}
