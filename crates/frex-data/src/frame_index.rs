//! Frame -> example lookup.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{DataError, SearchDocument, read_json};

/// One example evoking a frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FrameIndexEntry {
    /// Instance id of the example.
    pub instance_id: String,
    /// Global example index.
    pub idx: usize,
}

/// `frame_index.json`: frame name -> examples in corpus order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FrameIndex {
    /// Examples by frame.
    frames: BTreeMap<String, Vec<FrameIndexEntry>>,
}

impl FrameIndex {
    /// Loads the index file.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        read_json(path)
    }

    /// Builds the index from search documents.
    pub fn from_documents(documents: &[SearchDocument]) -> Self {
        let mut frames: BTreeMap<String, Vec<FrameIndexEntry>> = BTreeMap::new();
        for doc in documents {
            frames
                .entry(doc.frame_name.clone())
                .or_default()
                .push(FrameIndexEntry {
                    instance_id: doc.instance_id.clone(),
                    idx: doc.id,
                });
        }
        Self { frames }
    }

    /// Examples of `frame`; empty if unknown.
    pub fn instances(&self, frame: &str) -> &[FrameIndexEntry] {
        self.frames
            .get(frame)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Frames with their example counts, sorted by name.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.frames
            .iter()
            .map(|(frame, entries)| (frame.as_str(), entries.len()))
    }
}
