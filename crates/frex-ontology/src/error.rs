//! Error types for ontology loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading ontology files.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// Failed to read an ontology file.
    #[error("failed to read ontology file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An ontology file is not valid JSON of the expected shape.
    #[error("failed to parse ontology file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
