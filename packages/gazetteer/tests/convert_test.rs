//! Workbook to CSV conversion tests on small workbook fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use postal_gazetteer::builder::GazetteerBuilder;
use postal_gazetteer::convert::{convert_downloads, workbook_to_csv};
use postal_gazetteer::error::GazetteerError;
use postal_gazetteer::source::{
    load_municipality_csv, load_postal_csv, MunicipalityLayout, PostalLayout,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy both workbook fixtures into a fresh downloads directory.
fn downloads_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["munis.xlsx", "zips.xlsx"] {
        fs::copy(fixture(name), dir.path().join(name)).unwrap();
    }
    dir
}

#[test]
fn test_municipality_workbook_to_csv() {
    let dir = downloads_dir();
    let csv_path = dir.path().join("munis.csv");

    let rows = workbook_to_csv(&dir.path().join("munis.xlsx"), &csv_path).unwrap();
    assert_eq!(rows, 6);

    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Kunnat ja maakunnat 1.1.2025,,,,,,,"));
    assert!(lines.next().unwrap().starts_with("Kunnan numero,Kunta,"));
    assert_eq!(
        lines.next(),
        Some("091,Helsinki,Helsingfors,Helsinki,01,Uusimaa,Nyland,Uusimaa")
    );

    let municipalities = load_municipality_csv(&csv_path, &MunicipalityLayout::default()).unwrap();
    assert!(municipalities.warnings.is_empty());
    let codes: Vec<_> = municipalities
        .rows
        .iter()
        .map(|r| r.municipality_code.as_str())
        .collect();
    assert_eq!(codes, vec!["091", "049", "853", "202"]);
    assert_eq!(municipalities.rows[2].municipality_name_sv, "Åbo");
}

#[test]
fn test_postal_workbook_keeps_leading_zeros() {
    let dir = downloads_dir();
    let csv_path = dir.path().join("zips.csv");

    workbook_to_csv(&dir.path().join("zips.xlsx"), &csv_path).unwrap();

    let postal = load_postal_csv(&csv_path, &PostalLayout::default()).unwrap();
    assert!(postal.warnings.is_empty());
    assert_eq!(postal.rows.len(), 10);
    assert_eq!(postal.rows[0].zip, "00100");
    assert_eq!(postal.rows[0].name_fi, "Helsinki Keskusta - Etu-Töölö");
    assert_eq!(postal.rows[0].municipality_code, "091");
}

#[test]
fn test_converted_downloads_match_csv_exports() {
    let dir = downloads_dir();

    let paths = convert_downloads(Some(dir.path())).unwrap();
    assert_eq!(
        paths,
        vec![dir.path().join("munis.csv"), dir.path().join("zips.csv")]
    );

    let load = |municipalities: &Path, postal: &Path| {
        let municipalities =
            load_municipality_csv(municipalities, &MunicipalityLayout::default()).unwrap();
        let postal = load_postal_csv(postal, &PostalLayout::default()).unwrap();
        GazetteerBuilder::default().build(&municipalities.rows, &postal.rows)
    };

    let converted = load(&paths[0], &paths[1]);
    let exported = load(&fixture("munis.csv"), &fixture("zips.csv"));
    assert_eq!(converted, exported);
    assert_eq!(converted.split.neighborhood_count(), 15);
}

#[test]
fn test_convert_downloads_without_workbooks() {
    let dir = tempfile::tempdir().unwrap();

    let err = convert_downloads(Some(dir.path())).unwrap_err();
    match err {
        GazetteerError::Workbook { path, .. } => assert!(path.ends_with("munis.xlsx")),
        other => panic!("expected workbook error, got {other:?}"),
    }
}

#[test]
fn test_non_workbook_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = dir.path().join("munis.xlsx");
    fs::write(&workbook, "not a workbook").unwrap();

    let err = workbook_to_csv(&workbook, &dir.path().join("munis.csv")).unwrap_err();
    assert!(matches!(err, GazetteerError::Workbook { .. }));
    assert!(!dir.path().join("munis.csv").exists());
}
