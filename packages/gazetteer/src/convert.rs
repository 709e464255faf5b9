//! Conversion of the downloaded workbooks to the CSV files the build reads.
//!
//! Only the first worksheet is exported. Cells are written as their stored
//! values: text as-is, whole numbers without a fraction, empty cells empty.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::config::{
    DOWNLOADS_DIR, MUNICIPALITY_CSV, MUNICIPALITY_WORKBOOK, POSTAL_CSV, POSTAL_WORKBOOK,
};
use crate::error::{GazetteerError, Result};
use crate::output::write_atomic;

/// A workbook and the CSV file it is exported to, both relative to one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub workbook: &'static str,
    pub csv: &'static str,
}

/// The municipality and postal code exports.
pub const CONVERSIONS: [Conversion; 2] = [
    Conversion {
        workbook: MUNICIPALITY_WORKBOOK,
        csv: MUNICIPALITY_CSV,
    },
    Conversion {
        workbook: POSTAL_WORKBOOK,
        csv: POSTAL_CSV,
    },
];

/// Render a worksheet range as CSV, one record per sheet row.
pub fn render_csv(range: &Range<Data>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer
        .into_inner()
        .map_err(|e| GazetteerError::Io(e.into_error()))
}

/// Export the first worksheet of `workbook` to `csv_path`.
///
/// # Returns
/// Number of rows written
pub fn workbook_to_csv(workbook: &Path, csv_path: &Path) -> Result<usize> {
    let path = workbook.display().to_string();
    let unreadable = |source| GazetteerError::Workbook {
        path: path.clone(),
        source,
    };

    let mut book = open_workbook_auto(workbook).map_err(unreadable)?;
    let range = book
        .worksheet_range_at(0)
        .ok_or_else(|| GazetteerError::EmptyWorkbook { path: path.clone() })?
        .map_err(unreadable)?;

    write_atomic(csv_path, &render_csv(&range)?)?;
    tracing::info!(
        workbook = %workbook.display(),
        csv = %csv_path.display(),
        rows = range.height(),
        "Converted workbook"
    );

    Ok(range.height())
}

/// Convert both downloaded workbooks in `dir` (default: "downloads/").
///
/// # Returns
/// Paths of the written CSV files
pub fn convert_downloads(dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.unwrap_or(Path::new(DOWNLOADS_DIR));
    CONVERSIONS
        .iter()
        .map(|conversion| {
            let csv_path = dir.join(conversion.csv);
            workbook_to_csv(&dir.join(conversion.workbook), &csv_path)?;
            Ok(csv_path)
        })
        .collect()
}
