//! Error types for the gazetteer.
//!
//! Only structural failures are errors. Row-level problems (malformed rows,
//! unresolvable joins) are collected as warnings and never abort a build.

use thiserror::Error;

/// Main error type for the gazetteer library.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// Invalid postal code format.
    #[error("Invalid postal code: '{0}'. Expected five digits (e.g., 00100)")]
    InvalidPostalCode(String),

    /// The header row of a source file is missing.
    #[error("No header row found in {source_name}")]
    MissingHeader { source_name: String },

    /// A required column could not be resolved from the header row.
    #[error("Column '{column}' not found in header of {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// CSV decoding failed.
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a source file.
    #[error("Failed to download {name} from {url}: {source}")]
    Download {
        name: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body exceeded the configured maximum size.
    #[error("Response too large: {size} bytes exceeds limit of {limit} bytes")]
    ResponseTooLarge { size: u64, limit: u64 },

    /// All retry attempts were exhausted.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// A workbook could not be opened or read.
    #[error("Failed to read workbook {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: calamine::Error,
    },

    /// A workbook without any worksheet.
    #[error("Workbook {path} contains no worksheets")]
    EmptyWorkbook { path: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for gazetteer operations.
pub type Result<T> = std::result::Result<T, GazetteerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GazetteerError::InvalidPostalCode("1234".to_string());
        assert!(err.to_string().contains("1234"));
        assert!(err.to_string().contains("five digits"));
    }

    #[test]
    fn test_missing_column_display() {
        let err = GazetteerError::MissingColumn {
            column: "Kunnan numero".to_string(),
            source_name: "municipality taxonomy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column 'Kunnan numero' not found in header of municipality taxonomy"
        );
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = GazetteerError::RetriesExhausted {
            attempts: 3,
            message: "Server error: 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed after 3 attempts: Server error: 503"
        );
    }
}
