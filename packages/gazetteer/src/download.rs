//! Downloading of the two source workbooks.
//!
//! Each workbook is fetched with a blocking client. Server errors and
//! connection failures are retried with a doubling delay; client errors are
//! reported at once. Use [`crate::convert`] to turn the saved workbooks into
//! the CSV files the build reads.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::config::{
    DOWNLOADS_DIR, DOWNLOAD_ATTEMPTS, HTTP_TIMEOUT_SECS, MUNICIPALITY_SOURCE_URL,
    MUNICIPALITY_WORKBOOK, POSTAL_SOURCE_URL, POSTAL_WORKBOOK, RETRY_BASE_DELAY_MS,
};
use crate::error::{GazetteerError, Result};
use crate::output::write_atomic;

/// User agent string identifying this tool.
const USER_AGENT: &str = concat!("postal-gazetteer/", env!("CARGO_PKG_VERSION"));

/// A remote source file and where to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Human-readable name used in messages.
    pub name: &'static str,
    pub url: String,
    pub file_name: &'static str,
}

/// The municipality and postal code workbooks.
#[must_use]
pub fn source_files() -> Vec<SourceFile> {
    vec![
        SourceFile {
            name: "municipality taxonomy",
            url: MUNICIPALITY_SOURCE_URL.to_string(),
            file_name: MUNICIPALITY_WORKBOOK,
        },
        SourceFile {
            name: "postal code taxonomy",
            url: POSTAL_SOURCE_URL.to_string(),
            file_name: POSTAL_WORKBOOK,
        },
    ]
}

/// Create the HTTP client used for all downloads.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// What one request produced.
enum Attempt {
    Body(Vec<u8>),
    /// Worth retrying; carries the reason for the log and the final error.
    Transient(String),
}

fn check_size(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(GazetteerError::ResponseTooLarge { size, limit });
    }
    Ok(())
}

fn read_body(response: Response, max_size: u64) -> reqwest::Result<Result<Vec<u8>>> {
    if let Some(size) = response.content_length() {
        if let Err(e) = check_size(size, max_size) {
            return Ok(Err(e));
        }
    }
    let bytes = response.bytes()?;
    Ok(check_size(bytes.len() as u64, max_size).map(|()| bytes.to_vec()))
}

fn request(client: &Client, source: &SourceFile, max_size: u64) -> Result<Attempt> {
    let failed = |e: reqwest::Error| GazetteerError::Download {
        name: source.name.to_string(),
        url: source.url.clone(),
        source: e,
    };

    let response = match client.get(&source.url).send() {
        Ok(response) => response,
        Err(e) if e.is_connect() || e.is_timeout() => {
            return Ok(Attempt::Transient(e.to_string()));
        }
        Err(e) => return Err(failed(e)),
    };

    let status = response.status();
    if status.is_server_error() {
        return Ok(Attempt::Transient(format!("Server error: {status}")));
    }

    let response = response.error_for_status().map_err(failed)?;
    let body = read_body(response, max_size).map_err(failed)??;
    Ok(Attempt::Body(body))
}

/// Fetch the body of one source file.
///
/// Bodies larger than `max_size` bytes are rejected, whether the server
/// announces the size or not.
pub fn fetch(client: &Client, source: &SourceFile, max_size: u64) -> Result<Vec<u8>> {
    let mut last_reason = String::new();

    for attempt in 1..=DOWNLOAD_ATTEMPTS {
        if attempt > 1 {
            let delay = RETRY_BASE_DELAY_MS << (attempt - 2);
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match request(client, source, max_size)? {
            Attempt::Body(body) => return Ok(body),
            Attempt::Transient(reason) => {
                tracing::warn!(
                    source = source.name,
                    attempt,
                    attempts = DOWNLOAD_ATTEMPTS,
                    %reason,
                    "Download failed, will retry"
                );
                last_reason = reason;
            }
        }
    }

    Err(GazetteerError::RetriesExhausted {
        attempts: DOWNLOAD_ATTEMPTS,
        message: last_reason,
    })
}

/// Download one source file into `dir`.
///
/// # Returns
/// Path to the saved file
pub fn download_source(
    client: &Client,
    source: &SourceFile,
    dir: &Path,
    max_size: u64,
) -> Result<PathBuf> {
    let bytes = fetch(client, source, max_size)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(source.file_name);
    write_atomic(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Downloaded {}", source.name);

    Ok(path)
}

/// Download all source files into `dir` (default: "downloads/").
pub fn download_sources(
    client: &Client,
    sources: &[SourceFile],
    dir: Option<&Path>,
    max_size: u64,
) -> Result<Vec<PathBuf>> {
    let dir = dir.unwrap_or(Path::new(DOWNLOADS_DIR));
    sources
        .iter()
        .map(|source| download_source(client, source, dir, max_size))
        .collect()
}
