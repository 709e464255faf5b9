//! Artifact output for built gazetteers.

mod writer;

pub(crate) use writer::write_atomic;
pub use writer::{render, save_artifact, save_artifacts, ArtifactPaths, OutputFormat};
