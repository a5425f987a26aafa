//! Error types for corpus loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading corpus data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Failed to read a data file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A data file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A record inside a chunk does not have the expected shape.
    #[error("invalid record {index} in dataset '{dataset}': {source}")]
    InvalidRecord {
        /// Dataset name.
        dataset: String,
        /// Global record index.
        index: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A chunk loaded but does not contain the requested record.
    #[error("record {index} missing from dataset '{dataset}'")]
    RecordMissing {
        /// Dataset name.
        dataset: String,
        /// Global record index.
        index: usize,
    },

    /// An example index outside the corpus.
    #[error("example {index} out of range (corpus has {total} examples)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of examples in the corpus.
        total: usize,
    },

    /// Dataset metadata declares a zero chunk size.
    #[error("dataset '{dataset}' declares a chunk size of zero")]
    InvalidChunkSize {
        /// Dataset name.
        dataset: String,
    },
}
