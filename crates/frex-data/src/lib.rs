//! Corpus data for frex.
//!
//! The corpus is a directory of JSON files written by the preprocessing step:
//! - the primary dataset: annotated examples split into numbered chunk files, plus a
//!   flattened search document per example
//! - the secondary dataset: summaries linked to examples by instance id
//! - the ontology: frame definitions and the frame hierarchy
//! - optional source links: article title and URLs per example
//!
//! Chunks are loaded on demand and memoized for the session by [`ChunkCache`].

#![warn(missing_docs)]

mod cache;
mod corpus;
mod error;
mod frame_index;
mod model;
mod secondary;
mod store;
#[cfg(test)]
mod test_support;
mod text;
mod urls;

use std::{fs, path::Path};

pub use cache::ChunkCache;
pub use corpus::{
    Corpus, FRAME_INDEX_FILENAME, INSTANCE_MAPPING_FILENAME, LoadWarning, METADATA_FILENAME,
    SEARCH_INDEX_FILENAME, search_index_path,
};
pub use error::DataError;
pub use frame_index::{FrameIndex, FrameIndexEntry};
pub use model::{
    Annotation, AnnotationSpan, Document, DocumentVersion, Example, Metadata, SearchDocument,
    Trigger,
};
pub use secondary::{
    EnrichmentSource, SecondaryEntry, SecondaryMapping, SummaryKind, SummaryRecord,
    TemplateSpan, TokenAnnotation,
};
use serde::de::DeserializeOwned;
pub use store::{ChunkStore, FileChunkStore, chunk_filename};
pub use text::TextOrList;
pub use urls::{SourceLinks, URLS_FILENAME, UrlMapping};

/// Reads and deserializes a JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let contents = fs::read_to_string(path).map_err(|source| DataError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DataError::ParseJson {
        path: path.to_path_buf(),
        source,
    })
}
