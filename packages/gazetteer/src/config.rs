//! Configuration constants and validation functions for the gazetteer.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{GazetteerError, Result};

/// Municipality-to-region taxonomy workbook.
pub const MUNICIPALITY_SOURCE_URL: &str = "https://media.graphassets.com/DICwBPn5Q8uifsM6dwow";

/// Postal-code-to-municipality taxonomy workbook (Statistics Finland, Paavo).
pub const POSTAL_SOURCE_URL: &str =
    "https://stat.fi/media/uploads/tup/paavo/alueryhmittely_posnro_2025_fi.xlsx";

/// Default directory for downloaded source files.
pub const DOWNLOADS_DIR: &str = "downloads";

/// Default directory for generated artifacts.
pub const OUTPUT_DIR: &str = "output";

/// File name of the downloaded municipality workbook.
pub const MUNICIPALITY_WORKBOOK: &str = "munis.xlsx";

/// File name of the downloaded postal code workbook.
pub const POSTAL_WORKBOOK: &str = "zips.xlsx";

/// File name of the municipality CSV export.
pub const MUNICIPALITY_CSV: &str = "munis.csv";

/// File name of the postal code CSV export.
pub const POSTAL_CSV: &str = "zips.csv";

/// Artifact name of the unsplit join.
pub const RAW_ARTIFACT: &str = "by_zip";

/// Artifact name of the segmented join.
pub const SPLIT_ARTIFACT: &str = "split_inside_zip";

/// Indentation used for JSON artifacts.
pub const JSON_INDENT: &[u8] = b"    ";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Requests per source file before giving up on transient failures.
pub const DOWNLOAD_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled for each further retry.
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Default maximum HTTP response size in bytes (50 MB).
///
/// Both workbooks are well under a megabyte; anything this large is not one of them.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Finnish postal code: exactly five digits, leading zeros significant.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("valid regex"));

/// Validate postal code format.
///
/// # Examples
/// ```
/// use postal_gazetteer::config::validate_postal_code;
///
/// assert!(validate_postal_code("00100").is_ok());
/// assert!(validate_postal_code("100").is_err());
/// ```
pub fn validate_postal_code(zip: &str) -> Result<()> {
    if POSTAL_CODE_PATTERN.is_match(zip) {
        Ok(())
    } else {
        Err(GazetteerError::InvalidPostalCode(zip.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_postal_code_valid() {
        assert!(validate_postal_code("00100").is_ok());
        assert!(validate_postal_code("20100").is_ok());
        assert!(validate_postal_code("99999").is_ok());
    }

    #[test]
    fn test_validate_postal_code_invalid() {
        assert!(validate_postal_code("").is_err());
        assert!(validate_postal_code("0010").is_err()); // 4 digits
        assert!(validate_postal_code("001000").is_err()); // 6 digits
        assert!(validate_postal_code("00 100").is_err());
        assert!(validate_postal_code("FI-00100").is_err());
    }
}
