//! Error types for the frex-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when building or opening the search index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to read from the index.
    #[error("failed to read index: {0}")]
    Read(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),

    /// No config file determines where the index lives.
    #[error("no .frex.toml found; the index location is undefined")]
    NoLocation,
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }

    /// Creates a `Read` error from a Tantivy error.
    pub(crate) fn read(source: &tantivy::TantivyError) -> Self {
        Self::Read(source.to_string())
    }
}

/// A failed query against a single field.
///
/// These never abort a search: the engine logs them and the field contributes no hits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The field is not part of the index.
    #[error("unknown search field: {0}")]
    UnknownField(String),

    /// The query text could not be parsed for this field.
    #[error("malformed query for field {field}: {message}")]
    Malformed {
        /// Field queried.
        field: String,
        /// Parser message.
        message: String,
    },

    /// The index failed while executing the query.
    #[error("query on field {field} failed: {message}")]
    Execution {
        /// Field queried.
        field: String,
        /// Error message.
        message: String,
    },
}
