//! Command-line interface for the gazetteer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::GazetteerBuilder;
use crate::config::{
    validate_postal_code, DEFAULT_MAX_RESPONSE_SIZE, DOWNLOADS_DIR, MUNICIPALITY_CSV, POSTAL_CSV,
};
use crate::convert::convert_downloads;
use crate::download::{create_client, download_sources, source_files};
use crate::error::{GazetteerError, Result};
use crate::output::{save_artifacts, OutputFormat};
use crate::segmentation::{AlignmentPolicy, Segmenter};
use crate::source::{load_municipality_csv, load_postal_csv, MunicipalityLayout, PostalLayout};
use crate::types::Neighborhood;

/// Postal Gazetteer - Build a Finnish region/municipality/neighborhood gazetteer.
#[derive(Parser)]
#[command(name = "postal-gazetteer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the municipality and postal code workbooks and convert them to CSV.
    Download {
        /// Download directory (default: downloads/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum response size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_RESPONSE_SIZE)]
        max_size: u64,

        /// Keep the workbooks only, without writing the CSV files
        #[arg(long)]
        no_convert: bool,
    },

    /// Convert workbooks already in the download directory to CSV.
    Convert {
        /// Directory holding munis.xlsx and zips.xlsx (default: downloads/)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Join the CSV exports and write the by_zip and split_inside_zip artifacts.
    Build {
        /// Municipality taxonomy CSV (default: downloads/munis.csv)
        #[arg(short, long)]
        municipalities: Option<PathBuf>,

        /// Postal code taxonomy CSV (default: downloads/zips.csv)
        #[arg(short, long)]
        postal: Option<PathBuf>,

        /// Output directory (default: output/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Artifact format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// How to pair Finnish and Swedish names when their token counts differ
        #[arg(short, long, value_enum, default_value_t = AlignmentPolicy::Pad)]
        alignment: AlignmentPolicy,
    },

    /// Show how a single neighborhood name is segmented.
    Segment {
        /// Finnish name
        name_fi: String,

        /// Swedish name (default: same as the Finnish name)
        #[arg(short, long)]
        sv: Option<String>,

        /// Postal code
        #[arg(short, long, default_value = "00000")]
        zip: String,

        /// How to pair Finnish and Swedish names when their token counts differ
        #[arg(short, long, value_enum, default_value_t = AlignmentPolicy::Pad)]
        alignment: AlignmentPolicy,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            output,
            max_size,
            no_convert,
        } => download_command(output.as_deref(), max_size, !no_convert),
        Commands::Convert { dir } => convert_command(dir.as_deref()),
        Commands::Build {
            municipalities,
            postal,
            output,
            format,
            alignment,
        } => {
            let downloads = Path::new(DOWNLOADS_DIR);
            let municipalities = municipalities.unwrap_or_else(|| downloads.join(MUNICIPALITY_CSV));
            let postal = postal.unwrap_or_else(|| downloads.join(POSTAL_CSV));
            build_command(&municipalities, &postal, output.as_deref(), format, alignment)
        }
        Commands::Segment {
            name_fi,
            sv,
            zip,
            alignment,
        } => segment_command(&name_fi, sv.as_deref(), &zip, alignment),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the download command.
fn download_command(output: Option<&Path>, max_size: u64, convert: bool) -> Result<()> {
    let pb = spinner();
    pb.set_message("Downloading source workbooks...");

    let paths = create_client()
        .and_then(|client| download_sources(&client, &source_files(), output, max_size));
    pb.finish_and_clear();

    for path in &paths? {
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    if convert {
        convert_command(output)
    } else {
        println!();
        println!(
            "Run {} to write {} and {} for {}.",
            style("convert").bold(),
            style(MUNICIPALITY_CSV).cyan(),
            style(POSTAL_CSV).cyan(),
            style("build").bold()
        );
        Ok(())
    }
}

/// Execute the convert command.
fn convert_command(dir: Option<&Path>) -> Result<()> {
    let pb = spinner();
    pb.set_message("Converting workbooks to CSV...");

    let paths = convert_downloads(dir);
    pb.finish_and_clear();

    for path in &paths? {
        println!("{} {}", style("Converted:").green().bold(), path.display());
    }

    Ok(())
}

/// Execute the build command.
fn build_command(
    municipalities: &Path,
    postal: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    alignment: AlignmentPolicy,
) -> Result<()> {
    for input in [municipalities, postal] {
        if !input.is_file() {
            return Err(GazetteerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input file does not exist: {}", input.display()),
            )));
        }
    }

    println!(
        "{} {} + {}",
        style("Building").bold(),
        style(municipalities.display()).cyan(),
        style(postal.display()).cyan()
    );
    println!();

    let pb = spinner();
    pb.set_message("Reading source files...");

    let sources = load_municipality_csv(municipalities, &MunicipalityLayout::default())
        .and_then(|m| Ok((m, load_postal_csv(postal, &PostalLayout::default())?)));
    let (municipality_rows, postal_rows) = match sources {
        Ok(sources) => sources,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Joining taxonomies...");
    let builder = GazetteerBuilder::new(Segmenter::finnish().with_alignment(alignment));
    let built = builder.build(&municipality_rows.rows, &postal_rows.rows);

    pb.set_message("Saving artifacts...");
    let paths = save_artifacts(&built, format, output);
    pb.finish_and_clear();
    let paths = paths?;

    println!("  Regions: {}", built.raw.regions.len());
    println!("  Municipalities: {}", built.raw.municipality_count());
    println!("  Neighborhoods: {}", built.raw.neighborhood_count());
    println!(
        "  Neighborhoods after splitting: {}",
        built.split.neighborhood_count()
    );

    let skipped = municipality_rows.warnings.len() + postal_rows.warnings.len();
    let warnings = skipped + built.warnings.len();
    if warnings > 0 {
        println!("  Warnings: {}", style(warnings).yellow().bold());
        for warning in municipality_rows
            .warnings
            .iter()
            .chain(&postal_rows.warnings)
            .map(ToString::to_string)
            .chain(built.warnings.iter().map(ToString::to_string))
        {
            println!("    {}", style(warning).dim());
        }
    }

    println!();
    println!("{} {}", style("Saved to:").green().bold(), paths.raw.display());
    println!("{} {}", style("Saved to:").green().bold(), paths.split.display());

    Ok(())
}

/// Execute the segment command.
fn segment_command(
    name_fi: &str,
    sv: Option<&str>,
    zip: &str,
    alignment: AlignmentPolicy,
) -> Result<()> {
    validate_postal_code(zip)?;

    let segmenter = Segmenter::finnish().with_alignment(alignment);
    let neighborhood = Neighborhood::new(name_fi, sv.unwrap_or(name_fi), zip);

    for part in segmenter.segment(neighborhood) {
        println!(
            "{}  {}  {}",
            style(&part.zip).dim(),
            style(&part.name_fi).green(),
            part.name_sv.as_deref().map_or_else(
                || style("(no Swedish name)").yellow().to_string(),
                |name| style(name).cyan().to_string()
            )
        );
    }

    Ok(())
}
