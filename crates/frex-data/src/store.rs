//! Chunked record storage.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{DataError, read_json};

/// Source of chunk files.
pub trait ChunkStore {
    /// Loads every record of chunk `chunk` of `dataset`.
    fn load_chunk(&self, dataset: &str, chunk: usize) -> Result<Vec<Value>, DataError>;
}

/// File name of chunk `chunk`.
pub fn chunk_filename(chunk: usize) -> String {
    format!("chunk_{chunk:04}.json")
}

/// Reads chunks from `<root>/<dataset>/chunk_NNNN.json`.
#[derive(Debug, Clone)]
pub struct FileChunkStore {
    /// Corpus root.
    root: PathBuf,
}

impl FileChunkStore {
    /// Creates a store rooted at the corpus directory.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Path of a chunk file.
    pub fn chunk_path(&self, dataset: &str, chunk: usize) -> PathBuf {
        self.root.join(dataset).join(chunk_filename(chunk))
    }
}

impl ChunkStore for FileChunkStore {
    fn load_chunk(&self, dataset: &str, chunk: usize) -> Result<Vec<Value>, DataError> {
        read_json(&self.chunk_path(dataset, chunk))
    }
}
