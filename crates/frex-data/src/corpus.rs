//! The loaded corpus and its loading pipeline.
//!
//! Loading runs in a fixed order: primary metadata, search documents, secondary mapping,
//! source links, ontology frames, hierarchy. The first two are required. Later stages degrade to empty
//! collaborators and record a [`LoadWarning`].

use std::{
    fmt,
    path::{Path, PathBuf},
};

use frex_config::DatasetSettings;
use frex_ontology::{
    FRAMES_FILENAME, HIERARCHY_FILENAME, OntologyStore, load_frames, load_hierarchy,
};
use tracing::{info, warn};

use crate::{
    ChunkCache, DataError, Example, FileChunkStore, FrameIndex, Metadata, SearchDocument,
    SecondaryMapping, SourceLinks, SummaryRecord, URLS_FILENAME, UrlMapping,
    model::default_chunk_size, read_json,
};

/// Dataset metadata file.
pub const METADATA_FILENAME: &str = "metadata.json";

/// Search documents file of the primary dataset.
pub const SEARCH_INDEX_FILENAME: &str = "search_index.json";

/// Frame lookup file of the primary dataset.
pub const FRAME_INDEX_FILENAME: &str = "frame_index.json";

/// Instance mapping file of the secondary dataset.
pub const INSTANCE_MAPPING_FILENAME: &str = "instance_mapping.json";

/// Returns the path of the primary search documents file.
pub fn search_index_path(data_dir: &Path, datasets: &DatasetSettings) -> PathBuf {
    data_dir.join(&datasets.primary).join(SEARCH_INDEX_FILENAME)
}

/// A non-fatal problem encountered while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The secondary mapping could not be loaded; examples have no summaries.
    SecondaryUnavailable {
        /// Why loading failed.
        reason: String,
    },
    /// The source links file could not be loaded; examples show no URLs.
    UrlsUnavailable {
        /// Why loading failed.
        reason: String,
    },
    /// The ontology frames could not be loaded; no role definitions or hierarchy.
    OntologyUnavailable {
        /// Why loading failed.
        reason: String,
    },
    /// The hierarchy file could not be loaded; it was derived from frame ancestors.
    HierarchyDerived {
        /// Why loading failed.
        reason: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecondaryUnavailable { reason } => {
                write!(f, "summaries unavailable: {reason}")
            }
            Self::UrlsUnavailable { reason } => write!(f, "source links unavailable: {reason}"),
            Self::OntologyUnavailable { reason } => write!(f, "ontology unavailable: {reason}"),
            Self::HierarchyDerived { reason } => {
                write!(f, "hierarchy derived from frame ancestors: {reason}")
            }
        }
    }
}

/// The corpus: primary examples, search documents, secondary summaries and ontology.
#[derive(Debug)]
pub struct Corpus {
    /// Corpus root.
    root: PathBuf,
    /// Dataset directory names.
    datasets: DatasetSettings,
    /// Primary dataset metadata.
    metadata: Metadata,
    /// Secondary chunk size.
    secondary_chunk_size: usize,
    /// Search documents in corpus order.
    documents: Vec<SearchDocument>,
    /// Instance id -> summary entries.
    secondary: SecondaryMapping,
    /// Instance id -> source links.
    urls: UrlMapping,
    /// Frames and hierarchy.
    ontology: OntologyStore,
    /// Frame -> examples.
    frame_index: FrameIndex,
    /// Problems encountered while loading.
    warnings: Vec<LoadWarning>,
    /// Memoized chunk loads.
    cache: ChunkCache<FileChunkStore>,
}

impl Corpus {
    /// Loads the corpus rooted at `data_dir`.
    pub fn load(data_dir: &Path, datasets: &DatasetSettings) -> Result<Self, DataError> {
        let primary = data_dir.join(&datasets.primary);
        let secondary_dir = data_dir.join(&datasets.secondary);
        let ontology_dir = data_dir.join(&datasets.ontology);
        let mut warnings = Vec::new();

        let metadata: Metadata = read_json(&primary.join(METADATA_FILENAME))?;
        let documents: Vec<SearchDocument> = read_json(&primary.join(SEARCH_INDEX_FILENAME))?;

        let secondary = match SecondaryMapping::load(&secondary_dir.join(INSTANCE_MAPPING_FILENAME))
        {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!(error = %e, "secondary mapping unavailable");
                warnings.push(LoadWarning::SecondaryUnavailable {
                    reason: e.to_string(),
                });
                SecondaryMapping::default()
            }
        };
        let secondary_chunk_size = read_json::<Metadata>(&secondary_dir.join(METADATA_FILENAME))
            .map_or(default_chunk_size(), |m| m.chunk_size);

        let urls = match UrlMapping::load(&data_dir.join(URLS_FILENAME)) {
            Ok(mapping) => mapping,
            Err(e) => {
                warn!(error = %e, "source links unavailable");
                warnings.push(LoadWarning::UrlsUnavailable {
                    reason: e.to_string(),
                });
                UrlMapping::default()
            }
        };

        let ontology = load_ontology(&ontology_dir, &mut warnings);

        let frame_index = FrameIndex::load(&primary.join(FRAME_INDEX_FILENAME))
            .unwrap_or_else(|_| FrameIndex::from_documents(&documents));

        info!(
            examples = metadata.total_instances,
            documents = documents.len(),
            linked = secondary.len(),
            sourced = urls.len(),
            frames = ontology.len(),
            "corpus loaded"
        );

        Ok(Self {
            root: data_dir.to_path_buf(),
            datasets: datasets.clone(),
            metadata,
            secondary_chunk_size,
            documents,
            secondary,
            urls,
            ontology,
            frame_index,
            warnings,
            cache: ChunkCache::new(FileChunkStore::new(data_dir)),
        })
    }

    /// Corpus root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Primary dataset metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.metadata.total_instances
    }

    /// Returns true if the corpus has no examples.
    pub fn is_empty(&self) -> bool {
        self.metadata.total_instances == 0
    }

    /// Search documents in corpus order.
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Secondary mapping.
    pub fn secondary(&self) -> &SecondaryMapping {
        &self.secondary
    }

    /// Source links for every example that has them.
    pub fn urls(&self) -> &UrlMapping {
        &self.urls
    }

    /// Source links for `instance_id`, if any.
    pub fn source_links(&self, instance_id: &str) -> Option<&SourceLinks> {
        self.urls.get(instance_id)
    }

    /// Ontology.
    pub fn ontology(&self) -> &OntologyStore {
        &self.ontology
    }

    /// Frame -> examples lookup.
    pub fn frame_index(&self) -> &FrameIndex {
        &self.frame_index
    }

    /// Problems encountered while loading.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Path of the primary search documents file.
    pub fn search_index_path(&self) -> PathBuf {
        search_index_path(&self.root, &self.datasets)
    }

    /// Loads example `index` through the chunk cache.
    pub fn example(&mut self, index: usize) -> Result<Example, DataError> {
        if index >= self.metadata.total_instances {
            return Err(DataError::IndexOutOfRange {
                index,
                total: self.metadata.total_instances,
            });
        }
        self.cache
            .record(&self.datasets.primary, index, self.metadata.chunk_size)
    }

    /// Loads the canonical summary record linked to `instance_id`, if any.
    pub fn summary_for(&mut self, instance_id: &str) -> Result<Option<SummaryRecord>, DataError> {
        let Some(entry) = self.secondary.first(instance_id) else {
            return Ok(None);
        };
        let idx = entry.idx;
        self.cache
            .record(&self.datasets.secondary, idx, self.secondary_chunk_size)
            .map(Some)
    }

    /// The example after `index`, if any.
    pub fn next_index(&self, index: usize) -> Option<usize> {
        index
            .checked_add(1)
            .filter(|next| *next < self.metadata.total_instances)
    }

    /// The example before `index`, if any.
    pub fn prev_index(&self, index: usize) -> Option<usize> {
        index
            .checked_sub(1)
            .filter(|prev| *prev < self.metadata.total_instances)
    }
}

/// Loads ontology frames and hierarchy, degrading on failure.
fn load_ontology(dir: &Path, warnings: &mut Vec<LoadWarning>) -> OntologyStore {
    let frames = match load_frames(&dir.join(FRAMES_FILENAME)) {
        Ok(frames) => frames,
        Err(e) => {
            warn!(error = %e, "ontology unavailable");
            warnings.push(LoadWarning::OntologyUnavailable {
                reason: e.to_string(),
            });
            return OntologyStore::default();
        }
    };

    match load_hierarchy(&dir.join(HIERARCHY_FILENAME)) {
        Ok(hierarchy) => OntologyStore::new(frames, hierarchy),
        Err(e) => {
            warn!(error = %e, "deriving hierarchy from frame ancestors");
            warnings.push(LoadWarning::HierarchyDerived {
                reason: e.to_string(),
            });
            OntologyStore::from_frames(frames)
        }
    }
}
