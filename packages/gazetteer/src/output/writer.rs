//! Writer for gazetteer artifacts.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::BuildOutput;
use crate::config::{JSON_INDENT, OUTPUT_DIR, RAW_ARTIFACT, SPLIT_ARTIFACT};
use crate::error::Result;
use crate::types::Gazetteer;

/// Serialization format of an artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON indented with four spaces.
    #[default]
    Json,

    /// YAML document.
    Yaml,
}

impl OutputFormat {
    /// File extension, without the dot.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Paths of the two artifacts written by [`save_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub raw: PathBuf,
    pub split: PathBuf,
}

fn render_json(gazetteer: &Gazetteer) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    gazetteer.serialize(&mut serializer)?;

    let mut content =
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    content.push('\n');
    Ok(content)
}

fn render_yaml(gazetteer: &Gazetteer) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(gazetteer)?;
    Ok(format!("---\n{yaml}"))
}

/// Render a gazetteer in the given format.
pub fn render(gazetteer: &Gazetteer, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(gazetteer),
        OutputFormat::Yaml => render_yaml(gazetteer),
    }
}

/// Save a gazetteer as `<name>.<ext>` in `output_dir`.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
///
/// # Arguments
/// * `gazetteer` - The gazetteer to save
/// * `name` - Artifact name without extension (e.g. "by_zip")
/// * `format` - Serialization format
/// * `output_dir` - Output directory (default: "output/"), created if missing
///
/// # Returns
/// Path to the saved file
pub fn save_artifact(
    gazetteer: &Gazetteer,
    name: &str,
    format: OutputFormat,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let output_dir = output_dir.unwrap_or(Path::new(OUTPUT_DIR));
    fs::create_dir_all(output_dir)?;

    let output_file = output_dir.join(format!("{name}.{}", format.extension()));
    let content = render(gazetteer, format)?;
    write_atomic(&output_file, content.as_bytes())?;
    tracing::debug!(path = %output_file.display(), "Saved artifact");

    Ok(output_file)
}

/// Write `bytes` to `path` through a temp file in the same directory.
///
/// The temp file is synced before it is renamed over `path`, so readers never
/// see a partial file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Save both artifacts of a build (`by_zip` and `split_inside_zip`).
pub fn save_artifacts(
    output: &BuildOutput,
    format: OutputFormat,
    output_dir: Option<&Path>,
) -> Result<ArtifactPaths> {
    Ok(ArtifactPaths {
        raw: save_artifact(&output.raw, RAW_ARTIFACT, format, output_dir)?,
        split: save_artifact(&output.split, SPLIT_ARTIFACT, format, output_dir)?,
    })
}
