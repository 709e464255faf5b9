//! Readers for the CSV exports of the two source taxonomies.
//!
//! Columns are resolved by exact header name. Records that lack a resolved
//! column are skipped and reported as [`RowWarning`]s; a header that cannot
//! be resolved at all is fatal.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{GazetteerError, Result};
use crate::types::{MunicipalityRow, PostalRow};

const BOM: char = '\u{feff}';

/// A skipped source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based line of the record in the source, when known.
    pub line: Option<u64>,
    pub message: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Rows read from one source file, plus the records that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRows<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<RowWarning>,
}

impl<T> Default for SourceRows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Column layout of the municipality taxonomy export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityLayout {
    /// Records before the header row (the export starts with a title row).
    pub skip_rows: usize,
    pub region_code: String,
    /// Also matched after trimming; the source pads this header.
    pub region_name_fi: String,
    pub region_name_sv: String,
    pub region_name_en: String,
    pub municipality_code: String,
    pub municipality_name_fi: String,
    pub municipality_name_sv: String,
    pub municipality_name_en: String,
}

impl Default for MunicipalityLayout {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            region_code: "Maakunnan koodi".to_string(),
            region_name_fi: "Maakunta".to_string(),
            region_name_sv: "Maakunnan nimi ruotsiksi".to_string(),
            region_name_en: "Maakunnan nimi englanniksi".to_string(),
            municipality_code: "Kunnan numero".to_string(),
            municipality_name_fi: "Kunta".to_string(),
            municipality_name_sv: "Kunnan nimi ruotsiksi".to_string(),
            municipality_name_en: "Kunnan nimi englanniksi".to_string(),
        }
    }
}

/// Column layout of the postal code taxonomy export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalLayout {
    pub skip_rows: usize,
    pub zip: String,
    pub region_code: String,
    pub municipality_code: String,
    pub name_fi: String,
    pub name_sv: String,
}

impl Default for PostalLayout {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            zip: "Postinumeroalue".to_string(),
            region_code: "Maakunnan koodi".to_string(),
            municipality_code: "Kunnan koodi".to_string(),
            name_fi: "Postinumeroalueen nimi".to_string(),
            name_sv: "Postinumeroalueen nimi ruotsiksi".to_string(),
        }
    }
}

/// Header row of a source file.
struct Header<'a> {
    fields: StringRecord,
    source_name: &'a str,
}

impl Header<'_> {
    fn resolve(&self, column: &str) -> Result<Column> {
        self.fields
            .iter()
            .position(|field| field == column)
            .map(|index| Column {
                name: column.to_string(),
                index,
            })
            .ok_or_else(|| self.missing(column))
    }

    fn resolve_trimmed(&self, column: &str) -> Result<Column> {
        self.resolve(column).or_else(|_| {
            self.fields
                .iter()
                .position(|field| field.trim() == column)
                .map(|index| Column {
                    name: column.to_string(),
                    index,
                })
                .ok_or_else(|| self.missing(column))
        })
    }

    fn missing(&self, column: &str) -> GazetteerError {
        GazetteerError::MissingColumn {
            column: column.to_string(),
            source_name: self.source_name.to_string(),
        }
    }
}

/// A resolved column.
struct Column {
    name: String,
    index: usize,
}

impl Column {
    fn get<'r>(&self, record: &'r StringRecord) -> std::result::Result<&'r str, String> {
        record
            .get(self.index)
            .ok_or_else(|| format!("missing value for column '{}'", self.name))
    }
}

struct MunicipalityColumns {
    region_code: Column,
    region_name_fi: Column,
    region_name_sv: Column,
    region_name_en: Column,
    municipality_code: Column,
    municipality_name_fi: Column,
    municipality_name_sv: Column,
    municipality_name_en: Column,
}

impl MunicipalityColumns {
    fn row(&self, record: &StringRecord) -> std::result::Result<MunicipalityRow, String> {
        Ok(MunicipalityRow {
            region_code: self.region_code.get(record)?.trim().to_string(),
            region_name_fi: self.region_name_fi.get(record)?.to_string(),
            region_name_sv: self.region_name_sv.get(record)?.to_string(),
            region_name_en: self.region_name_en.get(record)?.to_string(),
            municipality_code: self.municipality_code.get(record)?.trim().to_string(),
            municipality_name_fi: self.municipality_name_fi.get(record)?.to_string(),
            municipality_name_sv: self.municipality_name_sv.get(record)?.to_string(),
            municipality_name_en: self.municipality_name_en.get(record)?.to_string(),
        })
    }
}

struct PostalColumns {
    zip: Column,
    region_code: Column,
    municipality_code: Column,
    name_fi: Column,
    name_sv: Column,
}

impl PostalColumns {
    fn row(&self, zip: &str, record: &StringRecord) -> std::result::Result<PostalRow, String> {
        Ok(PostalRow {
            zip: zip.to_string(),
            region_code: self.region_code.get(record)?.trim().to_string(),
            municipality_code: self.municipality_code.get(record)?.trim().to_string(),
            name_fi: self.name_fi.get(record)?.to_string(),
            name_sv: self.name_sv.get(record)?.to_string(),
        })
    }
}

fn line_of(record: &StringRecord) -> Option<u64> {
    record.position().map(csv::Position::line)
}

/// Read all records after `skip_rows` and the header row.
fn read_records<'a>(
    text: &str,
    skip_rows: usize,
    source_name: &'a str,
) -> Result<(Header<'a>, Vec<StringRecord>)> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records().skip(skip_rows);
    let fields = records
        .next()
        .transpose()?
        .ok_or_else(|| GazetteerError::MissingHeader {
            source_name: source_name.to_string(),
        })?;
    tracing::debug!(source = source_name, header = ?fields, "Resolved header row");

    let records = records.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((
        Header {
            fields,
            source_name,
        },
        records,
    ))
}

/// Parse the municipality taxonomy from CSV text.
pub fn read_municipality_rows(
    text: &str,
    layout: &MunicipalityLayout,
) -> Result<SourceRows<MunicipalityRow>> {
    let (header, records) = read_records(text, layout.skip_rows, "municipality taxonomy")?;

    let columns = MunicipalityColumns {
        region_code: header.resolve(&layout.region_code)?,
        region_name_fi: header.resolve_trimmed(&layout.region_name_fi)?,
        region_name_sv: header.resolve(&layout.region_name_sv)?,
        region_name_en: header.resolve(&layout.region_name_en)?,
        municipality_code: header.resolve(&layout.municipality_code)?,
        municipality_name_fi: header.resolve(&layout.municipality_name_fi)?,
        municipality_name_sv: header.resolve(&layout.municipality_name_sv)?,
        municipality_name_en: header.resolve(&layout.municipality_name_en)?,
    };

    let mut result = SourceRows::default();
    for record in &records {
        match columns.row(record) {
            Ok(row) => result.rows.push(row),
            Err(message) => {
                let warning = RowWarning {
                    line: line_of(record),
                    message,
                };
                tracing::warn!(%warning, "Skipping malformed municipality row");
                result.warnings.push(warning);
            }
        }
    }

    Ok(result)
}

/// Parse the postal code taxonomy from CSV text.
///
/// Reading stops at the first record with an empty postal code; the export
/// ends with summary rows after that point.
pub fn read_postal_rows(text: &str, layout: &PostalLayout) -> Result<SourceRows<PostalRow>> {
    let (header, records) = read_records(text, layout.skip_rows, "postal code taxonomy")?;

    let columns = PostalColumns {
        zip: header.resolve(&layout.zip)?,
        region_code: header.resolve(&layout.region_code)?,
        municipality_code: header.resolve(&layout.municipality_code)?,
        name_fi: header.resolve(&layout.name_fi)?,
        name_sv: header.resolve(&layout.name_sv)?,
    };

    let mut result = SourceRows::default();
    for record in &records {
        let parsed = columns.zip.get(record).map(str::trim).and_then(|zip| {
            if zip.is_empty() {
                Ok(None)
            } else {
                columns.row(zip, record).map(Some)
            }
        });

        match parsed {
            Ok(Some(row)) => result.rows.push(row),
            Ok(None) => {
                tracing::debug!(line = ?line_of(record), "Empty postal code, end of data");
                break;
            }
            Err(message) => {
                let warning = RowWarning {
                    line: line_of(record),
                    message,
                };
                tracing::warn!(%warning, "Skipping malformed postal code row");
                result.warnings.push(warning);
            }
        }
    }

    Ok(result)
}

/// Load the municipality taxonomy from a CSV file.
pub fn load_municipality_csv(
    path: &Path,
    layout: &MunicipalityLayout,
) -> Result<SourceRows<MunicipalityRow>> {
    let text = fs::read_to_string(path)?;
    read_municipality_rows(&text, layout)
}

/// Load the postal code taxonomy from a CSV file.
pub fn load_postal_csv(path: &Path, layout: &PostalLayout) -> Result<SourceRows<PostalRow>> {
    let text = fs::read_to_string(path)?;
    read_postal_rows(&text, layout)
}
