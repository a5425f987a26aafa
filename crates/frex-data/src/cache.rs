//! Session cache of loaded chunks.

use std::collections::HashMap;

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{ChunkStore, DataError};

/// Memoizes chunk loads by `(dataset, chunk)`.
///
/// Entries are never evicted for the life of the cache.
#[derive(Debug)]
pub struct ChunkCache<S> {
    /// Backing store.
    store: S,
    /// Loaded chunks.
    chunks: HashMap<(String, usize), Vec<Value>>,
}

impl<S: ChunkStore> ChunkCache<S> {
    /// Creates an empty cache over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            chunks: HashMap::new(),
        }
    }

    /// Returns the records of a chunk, loading it on first use.
    pub fn chunk(&mut self, dataset: &str, chunk: usize) -> Result<&[Value], DataError> {
        let key = (dataset.to_string(), chunk);
        if self.chunks.contains_key(&key) {
            debug!(dataset, chunk, "chunk cache hit");
        } else {
            let records = self.store.load_chunk(dataset, chunk)?;
            debug!(dataset, chunk, records = records.len(), "loaded chunk");
            self.chunks.insert(key.clone(), records);
        }
        Ok(self
            .chunks
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Returns record `index` of `dataset`, addressed as chunk `index / chunk_size` at offset
    /// `index % chunk_size`.
    pub fn record<T: DeserializeOwned>(
        &mut self,
        dataset: &str,
        index: usize,
        chunk_size: usize,
    ) -> Result<T, DataError> {
        if chunk_size == 0 {
            return Err(DataError::InvalidChunkSize {
                dataset: dataset.to_string(),
            });
        }
        let records = self.chunk(dataset, index / chunk_size)?;
        let value = records
            .get(index % chunk_size)
            .ok_or_else(|| DataError::RecordMissing {
                dataset: dataset.to_string(),
                index,
            })?;
        T::deserialize(value).map_err(|source| DataError::InvalidRecord {
            dataset: dataset.to_string(),
            index,
            source,
        })
    }

    /// Returns true if the chunk is already loaded.
    pub fn contains(&self, dataset: &str, chunk: usize) -> bool {
        self.chunks.contains_key(&(dataset.to_string(), chunk))
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns true if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
