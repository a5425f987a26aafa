//! Index building and opening.
//!
//! The [`Indexer`] owns the index lifecycle for one configuration: it reports status, rebuilds
//! from the corpus search documents when the stored hash no longer matches, and opens the
//! result for searching.

use std::{
    fs,
    path::{Path, PathBuf},
};

use frex_config::Config;
use frex_data::{EnrichmentSource, SearchDocument};
use tracing::info;

use crate::{
    IndexDocument, IndexError, IndexStatus, IndexWriter, TantivyFieldIndex, compute_config_hash,
    detect_index_status, index_directory, write_config_hash,
};

/// Statistics from a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Documents written.
    pub documents_indexed: usize,
    /// Documents with a linked secondary summary.
    pub documents_with_summary: usize,
}

/// Builds and opens the index for one configuration.
pub struct Indexer<'a> {
    /// The loaded configuration.
    config: &'a Config,
    /// Path to the index directory.
    index_dir: PathBuf,
    /// The search document file the index is built from.
    search_index: PathBuf,
}

impl<'a> Indexer<'a> {
    /// Creates an indexer for `config` and the corpus search document file.
    ///
    /// Fails if no config file determines where the index lives.
    pub fn new(config: &'a Config, search_index: &Path) -> Result<Self, IndexError> {
        let index_dir = index_directory(config).ok_or(IndexError::NoLocation)?;
        Ok(Self {
            config,
            index_dir,
            search_index: search_index.to_path_buf(),
        })
    }

    /// The index directory.
    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// Current status of the index.
    pub fn status(&self) -> IndexStatus {
        detect_index_status(self.config, &self.search_index)
    }

    /// Discards any existing index and writes every document.
    pub fn rebuild(
        &self,
        documents: &[SearchDocument],
        enrichment: &dyn EnrichmentSource,
    ) -> Result<IndexStats, IndexError> {
        if self.index_dir.exists() {
            fs::remove_dir_all(&self.index_dir)?;
        }

        let mut writer = IndexWriter::open(&self.index_dir, &self.config.search.stemmer)?;
        let mut stats = IndexStats::default();
        for doc in documents {
            let indexed = IndexDocument::new(doc, enrichment);
            if !indexed.summary.is_empty() {
                stats.documents_with_summary += 1;
            }
            writer.add_document(&indexed)?;
            stats.documents_indexed += 1;
        }
        writer.commit()?;

        write_config_hash(
            &self.index_dir,
            &compute_config_hash(self.config, &self.search_index),
        )?;

        info!(
            index = %self.index_dir.display(),
            documents = stats.documents_indexed,
            with_summary = stats.documents_with_summary,
            "search index built"
        );
        Ok(stats)
    }

    /// Opens the index for searching, rebuilding it first unless it is current.
    pub fn open(
        &self,
        documents: &[SearchDocument],
        enrichment: &dyn EnrichmentSource,
    ) -> Result<TantivyFieldIndex, IndexError> {
        let status = self.status();
        if status.needs_update() {
            info!(status = status.description(), "rebuilding search index");
            self.rebuild(documents, enrichment)?;
        }
        TantivyFieldIndex::open(
            &self.index_dir,
            &self.config.search.stemmer,
            self.config.search.per_field_limit,
        )
    }
}
