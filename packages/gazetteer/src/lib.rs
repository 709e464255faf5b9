//! Postal Gazetteer - Build a Finnish region/municipality/neighborhood gazetteer.
//!
//! This crate joins the municipality-to-region taxonomy with the
//! postal-code-to-municipality taxonomy and splits compound neighborhood
//! names ("Punavuori - Bulevardi") into their constituent places.
//!
//! # Example
//!
//! ```
//! use postal_gazetteer::segmentation::Segmenter;
//! use postal_gazetteer::types::Neighborhood;
//!
//! let segmenter = Segmenter::finnish();
//! let parts = segmenter.segment(Neighborhood::new(
//!     "Punavuori - Bulevardi",
//!     "Rödbergen - Bulevarden",
//!     "00120",
//! ));
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[1].name_sv.as_deref(), Some("Bulevarden"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (Region, Municipality, Neighborhood, rows)
//! - [`error`]: Error types and Result alias
//! - [`source`]: CSV readers for the two taxonomies
//! - [`segmentation`]: Compound name segmentation
//! - [`builder`]: Joins the taxonomies into raw and split gazetteers
//! - [`output`]: Artifact rendering and saving
//! - [`download`]: Source workbook download with retries
//! - [`convert`]: Workbook to CSV conversion
//! - [`cli`]: Command-line interface

pub mod builder;
pub mod cli;
pub mod config;
pub mod convert;
pub mod download;
pub mod error;
pub mod output;
pub mod segmentation;
pub mod source;
pub mod types;

// Re-export commonly used items
pub use builder::{BuildOutput, BuildWarning, GazetteerBuilder};
pub use config::validate_postal_code;
pub use error::{GazetteerError, Result};
pub use segmentation::{AlignmentPolicy, Segmenter};
pub use types::{Gazetteer, Municipality, MunicipalityRow, Neighborhood, PostalRow, Region};
